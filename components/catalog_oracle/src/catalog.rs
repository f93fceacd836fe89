// components/catalog_oracle/src/catalog.rs
use std::path::Path;

use audio_fingerprint::FingerprintGenerator;
use walkdir::WalkDir;

use crate::entry::{describe, CatalogEntry};
use crate::error::CatalogError;

const AUDIO_EXTENSIONS: &[&str] = &["flac", "mp3", "wav", "ogg", "m4a", "aac", "mp4"];

/// Reference recordings held in memory for one run
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Fingerprint every audio file under `root`.
    ///
    /// Files that fail to decode or fingerprint are skipped with a warning.
    pub fn build(
        root: impl AsRef<Path>,
        generator: &dyn FingerprintGenerator,
    ) -> Result<Self, CatalogError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(CatalogError::MissingDirectory(root.to_path_buf()));
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|source| CatalogError::Walk {
                path: root.to_path_buf(),
                source,
            })?;
            let path = entry.path();

            if !entry.file_type().is_file() || !is_audio(path) {
                continue;
            }

            let buffer = match sample_buffer::load(path) {
                Ok(buffer) => buffer,
                Err(e) => {
                    tracing::warn!("Skipping catalog file {}: {}", path.display(), e);
                    continue;
                }
            };
            let fingerprint = match generator.generate(&buffer) {
                Ok(fingerprint) => fingerprint,
                Err(e) => {
                    tracing::warn!("Skipping catalog file {}: {}", path.display(), e);
                    continue;
                }
            };

            let (title, artist) = describe(path);
            tracing::debug!(
                "Catalogued {} as {:?} by {:?}",
                path.display(),
                title,
                artist
            );
            entries.push(CatalogEntry::new(title, artist, fingerprint));
        }

        tracing::info!(
            "Catalog at {} holds {} recording(s)",
            root.display(),
            entries.len()
        );
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_audio(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

// components/catalog_oracle/src/entry.rs
use std::path::Path;

use audio_fingerprint::AudioFingerprint;
use lofty::{Accessor, Probe, TaggedFileExt};
use match_session::OracleMatch;

/// A known recording the catalog can identify
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub title: String,
    pub artist: Option<String>,
    pub fingerprint: AudioFingerprint,
}

impl CatalogEntry {
    pub fn new(title: impl Into<String>, artist: Option<String>, fingerprint: AudioFingerprint) -> Self {
        Self {
            title: title.into(),
            artist,
            fingerprint,
        }
    }

    pub(crate) fn to_match(&self) -> OracleMatch {
        OracleMatch {
            title: Some(self.title.clone()),
            subtitle: self.artist.clone(),
        }
    }
}

/// Title and artist for a reference file: tags first, then the file name
pub(crate) fn describe(path: &Path) -> (String, Option<String>) {
    let (stem_title, stem_artist) = infer_from_stem(path);

    match read_tags(path) {
        Some((title, artist)) => (title.unwrap_or(stem_title), artist.or(stem_artist)),
        None => (stem_title, stem_artist),
    }
}

fn read_tags(path: &Path) -> Option<(Option<String>, Option<String>)> {
    let tagged_file = Probe::open(path).ok()?.read().ok()?;
    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())?;

    let title = tag.title().map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
    let artist = tag.artist().map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
    Some((title, artist))
}

/// Handles the common `Artist - Title` file naming
fn infer_from_stem(path: &Path) -> (String, Option<String>) {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Unknown");

    match stem.split_once(" - ") {
        Some((artist, title)) if !artist.trim().is_empty() && !title.trim().is_empty() => {
            (title.trim().to_string(), Some(artist.trim().to_string()))
        }
        _ => (stem.to_string(), None),
    }
}

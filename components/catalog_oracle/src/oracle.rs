// components/catalog_oracle/src/oracle.rs
use std::sync::Arc;

use audio_fingerprint::{AudioFingerprint, FingerprintGenerator};
use match_session::{MatchNotifier, MatchOracle, OracleMatch};

use crate::catalog::Catalog;

pub const DEFAULT_MIN_MATCH_SECS: f32 = 5.0;

/// Identifies fingerprints against an in-memory [`Catalog`]
pub struct CatalogOracle {
    catalog: Arc<Catalog>,
    generator: Arc<dyn FingerprintGenerator>,
    min_match_secs: f32,
}

impl CatalogOracle {
    pub fn new(catalog: Arc<Catalog>, generator: Arc<dyn FingerprintGenerator>) -> Self {
        Self {
            catalog,
            generator,
            min_match_secs: DEFAULT_MIN_MATCH_SECS,
        }
    }

    /// Shortest aligned stretch that counts as a hit
    pub fn with_min_match_secs(mut self, seconds: f32) -> Self {
        self.min_match_secs = seconds;
        self
    }

    fn lookup(&self, query: &AudioFingerprint) -> Vec<OracleMatch> {
        lookup(&self.catalog, self.generator.as_ref(), self.min_match_secs, query)
    }
}

impl MatchOracle for CatalogOracle {
    fn submit(&self, fingerprint: AudioFingerprint, notifier: MatchNotifier) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            report(self.lookup(&fingerprint), &notifier);
            return;
        };

        let catalog = Arc::clone(&self.catalog);
        let generator = Arc::clone(&self.generator);
        let min_match_secs = self.min_match_secs;
        handle.spawn_blocking(move || {
            let hits = lookup(&catalog, generator.as_ref(), min_match_secs, &fingerprint);
            report(hits, &notifier);
        });
    }
}

fn lookup(
    catalog: &Catalog,
    generator: &dyn FingerprintGenerator,
    min_match_secs: f32,
    query: &AudioFingerprint,
) -> Vec<OracleMatch> {
    catalog
        .entries()
        .iter()
        .filter(|entry| match generator.compare(query, &entry.fingerprint) {
            Ok(spans) => spans
                .iter()
                .any(|span| span.duration_secs >= min_match_secs),
            Err(e) => {
                tracing::debug!("Could not compare against {:?}: {}", entry.title, e);
                false
            }
        })
        .map(|entry| entry.to_match())
        .collect()
}

fn report(hits: Vec<OracleMatch>, notifier: &MatchNotifier) {
    if hits.is_empty() {
        notifier.no_match();
    } else {
        notifier.matched(hits);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::CatalogEntry;
    use crate::testing::{song_samples, write_reference, TEST_RATE};
    use audio_fingerprint::ChromaprintGenerator;
    use match_session::{MatchRecord, MatchSession, SweepPhase, SweepSettings, DEFAULT_TIMEOUT};
    use sample_buffer::{AudioBuffer, WindowDescriptor};
    use tempfile::TempDir;

    fn generator() -> Arc<dyn FingerprintGenerator> {
        Arc::new(ChromaprintGenerator::new())
    }

    fn song(seed: u32, seconds: f32) -> AudioBuffer {
        AudioBuffer::from_planar(TEST_RATE, vec![song_samples(seed, seconds)]).unwrap()
    }

    fn catalog_of(songs: &[(u32, &str, &str)]) -> Arc<Catalog> {
        let generator = ChromaprintGenerator::new();
        let entries = songs
            .iter()
            .map(|(seed, title, artist)| {
                let fingerprint = generator.generate(&song(*seed, 30.0)).unwrap();
                CatalogEntry::new(*title, Some(artist.to_string()), fingerprint)
            })
            .collect();
        Arc::new(Catalog::from_entries(entries))
    }

    #[tokio::test]
    async fn identifies_a_window_cut_from_a_catalogued_song() {
        let catalog = catalog_of(&[(7, "Song A", "Artist A")]);
        let oracle = CatalogOracle::new(catalog, generator()).with_min_match_secs(3.0);
        let session = MatchSession::new(Arc::new(oracle), generator());

        let clip = song(7, 30.0)
            .extract(&WindowDescriptor::new(0, 15 * TEST_RATE as usize))
            .unwrap();
        let records = session.submit_window(clip, DEFAULT_TIMEOUT).await;

        assert_eq!(records, vec![MatchRecord::new("Song A", "Artist A")]);
    }

    #[tokio::test]
    async fn impossible_threshold_reports_no_match() {
        let catalog = catalog_of(&[(7, "Song A", "Artist A")]);
        let oracle = CatalogOracle::new(catalog, generator()).with_min_match_secs(f32::MAX);
        let session = MatchSession::new(Arc::new(oracle), generator());

        let started = tokio::time::Instant::now();
        let records = session.submit_window(song(7, 30.0), DEFAULT_TIMEOUT).await;

        assert!(records.is_empty());
        assert!(started.elapsed() < DEFAULT_TIMEOUT);
    }

    #[tokio::test]
    async fn empty_catalog_never_matches() {
        let oracle = CatalogOracle::new(Arc::new(Catalog::default()), generator());
        let session = MatchSession::new(Arc::new(oracle), generator());

        let records = session.submit_window(song(3, 20.0), DEFAULT_TIMEOUT).await;
        assert!(records.is_empty());
    }

    #[test]
    fn lookup_works_without_a_runtime() {
        let catalog = catalog_of(&[(11, "Song B", "Artist B")]);
        let generator = ChromaprintGenerator::new();
        let query = generator.generate(&song(11, 30.0)).unwrap();

        let hits = lookup(&catalog, &generator, 3.0, &query);
        assert_eq!(hits, vec![OracleMatch::new("Song B", "Artist B")]);
    }

    #[tokio::test]
    async fn sweep_over_catalogued_files_finds_the_song() {
        let dir = TempDir::new().unwrap();
        write_reference(dir.path(), "Artist A - Song A.wav", 21, 30.0);
        let generator = generator();
        let catalog = Arc::new(Catalog::build(dir.path(), generator.as_ref()).unwrap());
        let oracle = CatalogOracle::new(catalog, Arc::clone(&generator)).with_min_match_secs(3.0);
        let session = MatchSession::new(Arc::new(oracle), generator);

        let recording = sample_buffer::load(dir.path().join("Artist A - Song A.wav")).unwrap();
        let report = session.sweep(&recording, &SweepSettings::default()).await;

        assert_eq!(report.phase(), SweepPhase::Normal);
        let lines: Vec<_> = report.into_result_set().lines().collect();
        assert_eq!(lines, vec!["Song A - Artist A"]);
    }
}

// components/match_session/src/session.rs
use std::sync::Arc;
use std::time::Duration;

use audio_fingerprint::FingerprintGenerator;
use sample_buffer::AudioBuffer;
use tokio::sync::mpsc;

use crate::oracle::{MatchNotifier, MatchOracle, OracleEvent};
use crate::record::MatchRecord;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(6);

/// One conversation with a match oracle.
///
/// Submissions are strictly one at a time: notifications carry no request
/// identity, so each wait owns a fresh channel and anything arriving after
/// the wait ends is discarded.
pub struct MatchSession {
    oracle: Arc<dyn MatchOracle>,
    generator: Arc<dyn FingerprintGenerator>,
}

impl MatchSession {
    pub fn new(oracle: Arc<dyn MatchOracle>, generator: Arc<dyn FingerprintGenerator>) -> Self {
        Self { oracle, generator }
    }

    /// Fingerprint `buffer`, submit it, and collect what the oracle reports
    /// before the first notification or `timeout`, whichever comes first.
    pub async fn submit_window(&self, buffer: AudioBuffer, timeout: Duration) -> Vec<MatchRecord> {
        self.submit(buffer, timeout).await.unwrap_or_default()
    }

    /// Like [`Self::submit_window`], but `None` when fingerprinting failed
    /// and nothing reached the oracle.
    pub(crate) async fn submit(
        &self,
        buffer: AudioBuffer,
        timeout: Duration,
    ) -> Option<Vec<MatchRecord>> {
        let generator = Arc::clone(&self.generator);
        let fingerprint =
            match tokio::task::spawn_blocking(move || generator.generate(&buffer)).await {
                Ok(Ok(fingerprint)) => fingerprint,
                Ok(Err(e)) => {
                    tracing::debug!("Fingerprinting failed, treating window as unmatched: {}", e);
                    return None;
                }
                Err(e) => {
                    tracing::warn!("Fingerprinting task failed, treating window as unmatched: {}", e);
                    return None;
                }
            };

        let (sender, mut receiver) = mpsc::unbounded_channel();
        self.oracle.submit(fingerprint, MatchNotifier::new(sender));

        let mut records = Vec::new();
        match tokio::time::timeout(timeout, receiver.recv()).await {
            Ok(Some(event)) => {
                absorb(event, &mut records);
                // Anything already queued behind the first notification belongs to this submission too
                while let Ok(event) = receiver.try_recv() {
                    absorb(event, &mut records);
                }
            }
            Ok(None) => {
                tracing::debug!("Oracle released the submission without reporting");
            }
            Err(_) => {
                tracing::debug!("No notification within {:?}", timeout);
            }
        }

        Some(records)
    }
}

fn absorb(event: OracleEvent, records: &mut Vec<MatchRecord>) {
    match event {
        OracleEvent::Matched(hits) => {
            tracing::debug!("Oracle reported {} hit(s)", hits.len());
            records.extend(hits.into_iter().map(MatchRecord::from));
        }
        OracleEvent::NoMatch => {
            tracing::debug!("Oracle reported no match");
        }
    }
}

// components/match_session/src/oracle.rs
use audio_fingerprint::AudioFingerprint;
use tokio::sync::mpsc;

use crate::record::OracleMatch;

/// What an oracle can report back about a submission
#[derive(Debug, Clone, PartialEq)]
pub enum OracleEvent {
    Matched(Vec<OracleMatch>),
    NoMatch,
}

/// Something that identifies fingerprints and reports back asynchronously.
///
/// `submit` must return promptly. Results are delivered later through the
/// notifier, from any thread, zero or more times.
pub trait MatchOracle: Send + Sync {
    fn submit(&self, fingerprint: AudioFingerprint, notifier: MatchNotifier);
}

/// Callback handle tied to exactly one submission
#[derive(Debug, Clone)]
pub struct MatchNotifier {
    sender: mpsc::UnboundedSender<OracleEvent>,
}

impl MatchNotifier {
    pub(crate) fn new(sender: mpsc::UnboundedSender<OracleEvent>) -> Self {
        Self { sender }
    }

    /// Report hits. Returns false once the submission has stopped listening.
    pub fn matched(&self, matches: Vec<OracleMatch>) -> bool {
        self.deliver(OracleEvent::Matched(matches))
    }

    /// Report that nothing matched, releasing the waiting submission early.
    pub fn no_match(&self) -> bool {
        self.deliver(OracleEvent::NoMatch)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    fn deliver(&self, event: OracleEvent) -> bool {
        match self.sender.send(event) {
            Ok(()) => true,
            Err(late) => {
                tracing::trace!("Dropping notification for finished submission: {:?}", late.0);
                false
            }
        }
    }
}

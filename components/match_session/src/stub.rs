// Test doubles shared by the session and sweep tests
use std::collections::VecDeque;
use std::thread::ThreadId;
use std::time::Duration;

use audio_fingerprint::{AudioFingerprint, FingerprintError, FingerprintGenerator, MatchedSpan};
use parking_lot::Mutex;
use sample_buffer::AudioBuffer;

use crate::oracle::{MatchNotifier, MatchOracle};
use crate::record::OracleMatch;

/// Fingerprints a buffer as its frame count, so tests can tell which buffer was submitted
pub struct FrameCountGenerator;

impl FingerprintGenerator for FrameCountGenerator {
    fn generate(&self, buffer: &AudioBuffer) -> Result<AudioFingerprint, FingerprintError> {
        if buffer.is_empty() {
            return Err(FingerprintError::EmptyBuffer);
        }
        Ok(AudioFingerprint::new(vec![buffer.frame_count() as u32]))
    }

    fn compare(
        &self,
        _query: &AudioFingerprint,
        _reference: &AudioFingerprint,
    ) -> Result<Vec<MatchedSpan>, FingerprintError> {
        Ok(Vec::new())
    }
}

pub struct FailingGenerator;

impl FingerprintGenerator for FailingGenerator {
    fn generate(&self, _buffer: &AudioBuffer) -> Result<AudioFingerprint, FingerprintError> {
        Err(FingerprintError::Generation("silent segment".to_string()))
    }

    fn compare(
        &self,
        _query: &AudioFingerprint,
        _reference: &AudioFingerprint,
    ) -> Result<Vec<MatchedSpan>, FingerprintError> {
        Ok(Vec::new())
    }
}

/// Remembers which thread ran the last `generate` call
#[derive(Default)]
pub struct ThreadRecordingGenerator {
    thread: Mutex<Option<ThreadId>>,
}

impl ThreadRecordingGenerator {
    pub fn thread(&self) -> Option<ThreadId> {
        *self.thread.lock()
    }
}

impl FingerprintGenerator for ThreadRecordingGenerator {
    fn generate(&self, buffer: &AudioBuffer) -> Result<AudioFingerprint, FingerprintError> {
        *self.thread.lock() = Some(std::thread::current().id());
        FrameCountGenerator.generate(buffer)
    }

    fn compare(
        &self,
        _query: &AudioFingerprint,
        _reference: &AudioFingerprint,
    ) -> Result<Vec<MatchedSpan>, FingerprintError> {
        Ok(Vec::new())
    }
}

pub enum Reply {
    /// Never answer; the submission runs into its timeout
    Silent,
    NoMatch,
    Hits(Vec<OracleMatch>),
    Twice(Vec<OracleMatch>, Vec<OracleMatch>),
    Delayed(Duration, Vec<OracleMatch>),
}

/// Answers each submission with the next scripted reply, then stays silent
pub struct ScriptedOracle {
    script: Mutex<VecDeque<Reply>>,
    submissions: Mutex<Vec<AudioFingerprint>>,
    notifiers: Mutex<Vec<MatchNotifier>>,
}

impl ScriptedOracle {
    pub fn new(script: Vec<Reply>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            submissions: Mutex::new(Vec::new()),
            notifiers: Mutex::new(Vec::new()),
        }
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().len()
    }

    /// Frame counts of the submitted buffers, in order
    pub fn submitted_frames(&self) -> Vec<u32> {
        self.submissions
            .lock()
            .iter()
            .map(|fingerprint| fingerprint.raw_data()[0])
            .collect()
    }

    pub fn last_notifier(&self) -> Option<MatchNotifier> {
        self.notifiers.lock().last().cloned()
    }
}

impl MatchOracle for ScriptedOracle {
    fn submit(&self, fingerprint: AudioFingerprint, notifier: MatchNotifier) {
        self.submissions.lock().push(fingerprint);
        let reply = self.script.lock().pop_front().unwrap_or(Reply::Silent);

        match reply {
            Reply::Silent => {}
            Reply::NoMatch => {
                notifier.no_match();
            }
            Reply::Hits(hits) => {
                notifier.matched(hits);
            }
            Reply::Twice(first, second) => {
                notifier.matched(first);
                notifier.matched(second);
            }
            Reply::Delayed(delay, hits) => {
                let delayed = notifier.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    delayed.matched(hits);
                });
            }
        }

        // Holding on to the notifier keeps the channel open, as a real oracle would
        self.notifiers.lock().push(notifier);
    }
}

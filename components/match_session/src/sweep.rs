// components/match_session/src/sweep.rs
use std::time::Duration;

use sample_buffer::{
    AudioBuffer, BufferError, WindowDescriptor, WindowPlan, DEFAULT_CHUNK_SECS,
    DEFAULT_OVERLAP_SECS,
};

use crate::dedup::ResultSet;
use crate::error::SessionError;
use crate::record::MatchRecord;
use crate::session::{MatchSession, DEFAULT_TIMEOUT};

/// How a recording is cut up and how long each submission may wait
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepSettings {
    pub chunk_secs: f64,
    pub overlap_secs: f64,
    pub timeout: Duration,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            chunk_secs: DEFAULT_CHUNK_SECS,
            overlap_secs: DEFAULT_OVERLAP_SECS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SweepSettings {
    pub fn validate(&self) -> Result<(), SessionError> {
        if !self.chunk_secs.is_finite() || self.chunk_secs <= 0.0 {
            return Err(SessionError::InvalidSettings(format!(
                "chunk must be a positive number of seconds, got {}",
                self.chunk_secs
            )));
        }
        if !self.overlap_secs.is_finite() || self.overlap_secs < 0.0 {
            return Err(SessionError::InvalidSettings(format!(
                "overlap must be zero or more seconds, got {}",
                self.overlap_secs
            )));
        }
        if self.timeout.is_zero() {
            return Err(SessionError::InvalidSettings(
                "timeout must be longer than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Which pass produced the final records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepPhase {
    /// Every planned window was submitted
    #[default]
    Normal,
    /// No window matched, so the whole recording was submitted once more
    Fallback,
}

/// Everything a sweep collected, in arrival order
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    records: Vec<MatchRecord>,
    phase: SweepPhase,
    windows_planned: usize,
    windows_submitted: usize,
    windows_skipped: usize,
}

impl SweepReport {
    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn phase(&self) -> SweepPhase {
        self.phase
    }

    pub fn windows_planned(&self) -> usize {
        self.windows_planned
    }

    pub fn windows_submitted(&self) -> usize {
        self.windows_submitted
    }

    pub fn windows_skipped(&self) -> usize {
        self.windows_skipped
    }

    pub fn into_result_set(self) -> ResultSet {
        ResultSet::from_records(self.records)
    }
}

impl MatchSession {
    /// Submit every window of `buffer` in order, then the whole buffer once
    /// if none of them matched.
    pub async fn sweep(&self, buffer: &AudioBuffer, settings: &SweepSettings) -> SweepReport {
        self.sweep_with(buffer, settings, AudioBuffer::extract).await
    }

    async fn sweep_with<F>(
        &self,
        buffer: &AudioBuffer,
        settings: &SweepSettings,
        extract: F,
    ) -> SweepReport
    where
        F: Fn(&AudioBuffer, &WindowDescriptor) -> Result<AudioBuffer, BufferError>,
    {
        let plan = WindowPlan::new(
            settings.chunk_secs,
            settings.overlap_secs,
            buffer.sample_rate(),
            buffer.frame_count(),
        );
        let rate = buffer.sample_rate();

        let mut report = SweepReport {
            windows_planned: plan.window_count(),
            ..SweepReport::default()
        };
        tracing::info!(
            "Sweeping {} window(s) of {:.1}s every {:.1}s",
            report.windows_planned,
            plan.window_frames() as f64 / rate as f64,
            plan.step_frames() as f64 / rate as f64
        );

        for (index, window) in plan.windows().enumerate() {
            let clip = match extract(buffer, &window) {
                Ok(clip) => clip,
                Err(e) => {
                    tracing::debug!("Skipping window {}: {}", index + 1, e);
                    report.windows_skipped += 1;
                    continue;
                }
            };

            tracing::debug!(
                "Window {}/{} at {:.1}s ({:.1}s)",
                index + 1,
                report.windows_planned,
                window.start_secs(rate),
                window.length_secs(rate)
            );
            if let Some(hits) = self.submit(clip, settings.timeout).await {
                report.windows_submitted += 1;
                report.records.extend(hits);
            }
        }

        if report.records.is_empty() {
            tracing::info!("No window matched, trying the whole recording");
            report.phase = SweepPhase::Fallback;
            report.records = self
                .submit_window(buffer.clone(), settings.timeout)
                .await;
        }

        tracing::info!(
            "Sweep finished in {:?} phase with {} hit(s)",
            report.phase,
            report.records.len()
        );
        report
    }
}

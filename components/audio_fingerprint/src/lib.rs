mod error;
mod types;

pub use error::FingerprintError;
pub use types::{AudioFingerprint, MatchedSpan};

use rusty_chromaprint::{match_fingerprints, Configuration, Fingerprinter};
use sample_buffer::AudioBuffer;

/// Turns audio into fingerprints and compares them
pub trait FingerprintGenerator: Send + Sync {
    fn generate(&self, buffer: &AudioBuffer) -> Result<AudioFingerprint, FingerprintError>;

    /// Spans where `query` lines up with `reference`
    fn compare(
        &self,
        query: &AudioFingerprint,
        reference: &AudioFingerprint,
    ) -> Result<Vec<MatchedSpan>, FingerprintError>;
}

/// Chromaprint-compatible fingerprints computed in-process
pub struct ChromaprintGenerator {
    config: Configuration,
}

impl ChromaprintGenerator {
    pub fn new() -> Self {
        // preset_test2 is the AcoustID-compatible configuration
        Self {
            config: Configuration::preset_test2(),
        }
    }
}

impl Default for ChromaprintGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl FingerprintGenerator for ChromaprintGenerator {
    fn generate(&self, buffer: &AudioBuffer) -> Result<AudioFingerprint, FingerprintError> {
        if buffer.is_empty() {
            return Err(FingerprintError::EmptyBuffer);
        }

        let channels = u32::try_from(buffer.channel_count())
            .map_err(|_| FingerprintError::InvalidFormat("too many channels".to_string()))?;

        let mut printer = Fingerprinter::new(&self.config);
        printer
            .start(buffer.sample_rate(), channels)
            .map_err(|e| FingerprintError::Generation(format!("{:?}", e)))?;
        printer.consume(&interleave_i16(buffer));
        printer.finish();

        let raw = printer.fingerprint();
        if raw.is_empty() {
            return Err(FingerprintError::Generation(format!(
                "no fingerprint produced for {:.1}s of audio",
                buffer.duration().as_secs_f64()
            )));
        }

        tracing::trace!("Generated fingerprint of {} items", raw.len());
        Ok(AudioFingerprint::new(raw.to_vec()))
    }

    fn compare(
        &self,
        query: &AudioFingerprint,
        reference: &AudioFingerprint,
    ) -> Result<Vec<MatchedSpan>, FingerprintError> {
        let segments = match_fingerprints(query.raw_data(), reference.raw_data(), &self.config)
            .map_err(|e| FingerprintError::Comparison(format!("{:?}", e)))?;

        Ok(segments
            .iter()
            .map(|segment| MatchedSpan {
                query_offset_secs: segment.start1(&self.config),
                reference_offset_secs: segment.start2(&self.config),
                duration_secs: segment.duration(&self.config),
            })
            .collect())
    }
}

/// Interleave planar float channels into the 16-bit PCM chromaprint consumes
fn interleave_i16(buffer: &AudioBuffer) -> Vec<i16> {
    let channels: Vec<&[f32]> = buffer.channels().collect();
    let mut samples = Vec::with_capacity(buffer.frame_count() * channels.len());
    for frame in 0..buffer.frame_count() {
        for channel in &channels {
            let sample = channel[frame].clamp(-1.0, 1.0);
            samples.push((sample * i16::MAX as f32) as i16);
        }
    }
    samples
}

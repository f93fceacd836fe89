// components/sample_buffer/src/buffer.rs
use std::time::Duration;

use crate::error::BufferError;
use crate::window::WindowDescriptor;

/// Decoded audio held entirely in memory, one sample vector per channel
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Build a buffer from planar channel data.
    ///
    /// Every channel must hold the same number of frames.
    pub fn from_planar(sample_rate: u32, channels: Vec<Vec<f32>>) -> Result<Self, BufferError> {
        if sample_rate == 0 {
            return Err(BufferError::InvalidLayout(
                "sample rate must be positive".to_string(),
            ));
        }

        let Some(first) = channels.first() else {
            return Err(BufferError::InvalidLayout(
                "at least one channel is required".to_string(),
            ));
        };

        let frames = first.len();
        if let Some((index, channel)) = channels
            .iter()
            .enumerate()
            .find(|(_, channel)| channel.len() != frames)
        {
            return Err(BufferError::InvalidLayout(format!(
                "channel {} holds {} frames, expected {}",
                index,
                channel.len(),
                frames
            )));
        }

        Ok(Self {
            sample_rate,
            channels,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn frame_count(&self) -> usize {
        self.channels.first().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }

    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub fn channels(&self) -> impl Iterator<Item = &[f32]> {
        self.channels.iter().map(Vec::as_slice)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.frame_count() as f64 / self.sample_rate as f64)
    }

    /// Copy the frames covered by `window` into a new buffer.
    pub fn extract(&self, window: &WindowDescriptor) -> Result<AudioBuffer, BufferError> {
        let total = self.frame_count();
        if window.end() > total {
            return Err(BufferError::WindowOutOfBounds {
                start: window.start(),
                end: window.end(),
                total,
            });
        }

        let mut channels = Vec::new();
        channels
            .try_reserve_exact(self.channels.len())
            .map_err(|_| BufferError::Extraction {
                start: window.start(),
                length: window.length(),
            })?;

        for source in &self.channels {
            let mut samples = Vec::new();
            samples
                .try_reserve_exact(window.length())
                .map_err(|_| BufferError::Extraction {
                    start: window.start(),
                    length: window.length(),
                })?;
            samples.extend_from_slice(&source[window.range()]);
            channels.push(samples);
        }

        Ok(AudioBuffer {
            sample_rate: self.sample_rate,
            channels,
        })
    }
}

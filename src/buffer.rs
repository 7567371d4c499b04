//! Interleaved sample buffer shared by every stage of the choir pipeline.

use crate::error::{ChoirError, Result};

/// A fully decoded clip: interleaved f32 samples (frame-major,
/// channel-minor) plus the format needed to interpret them.
///
/// Invariant: `samples.len() == total_frames() * channels`, with
/// `channels` 1 or 2 and at least one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl AudioBuffer {
    /// Wrap decoded samples, checking the buffer invariant.
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Result<Self> {
        let buffer = Self {
            samples,
            sample_rate,
            channels,
        };
        buffer.validate()?;
        Ok(buffer)
    }

    /// Check the buffer invariant on an already-built buffer.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(ChoirError::InvalidBuffer("sample rate must be positive".into()));
        }
        let channels = self.channels;
        if channels != 1 && channels != 2 {
            return Err(ChoirError::InvalidBuffer(format!(
                "expected 1 or 2 channels, got {channels}"
            )));
        }
        if self.samples.is_empty() {
            return Err(ChoirError::InvalidBuffer("buffer holds no frames".into()));
        }
        if self.samples.len() % channels as usize != 0 {
            return Err(ChoirError::InvalidBuffer(format!(
                "{} samples do not divide into {channels}-channel frames",
                self.samples.len()
            )));
        }
        Ok(())
    }

    /// A single-channel buffer.
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Result<Self> {
        Self::new(samples, sample_rate, 1)
    }

    /// An all-zero stereo buffer of `total_frames` frames.
    pub fn silent_stereo(total_frames: usize, sample_rate: u32) -> Self {
        Self {
            samples: vec![0.0; total_frames * 2],
            sample_rate,
            channels: 2,
        }
    }

    /// Number of frames (samples per channel).
    pub fn total_frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn is_stereo(&self) -> bool {
        self.channels == 2
    }

    /// Duration of the clip in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.total_frames() as f64 / self.sample_rate as f64
    }

    /// Copy out one channel of the buffer.
    #[cfg(test)]
    pub(crate) fn channel(&self, index: usize) -> Vec<f32> {
        self.samples
            .iter()
            .skip(index)
            .step_by(self.channels as usize)
            .copied()
            .collect()
    }
}

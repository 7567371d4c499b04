//! Voice — per-voice shift, delay, and channel for one choir render.

use log::debug;
use rand::Rng;
use serde::Serialize;

use super::offsets::generate_offsets;

/// Divisor that maps a pitch offset to a whole-clip frame shift.
///
/// The shift scales with the clip length, not the sample rate.
pub const SHIFT_DIVISOR: f64 = 1200.0;

/// Derived settings for a single voice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceParameters {
    /// Position in the choir, `0..num_voices`.
    pub index: usize,
    /// Offset from the pitch sequence.
    pub pitch_offset: f64,
    /// `floor(pitch_offset * total_frames / 1200)`; may be negative.
    pub frame_shift: i64,
    /// Random onset delay in frames, drawn from `[0, max_delay_samples]`.
    pub random_delay: u64,
    /// Output channel: 0 (left) for even voices, 1 (right) for odd.
    pub output_channel: usize,
}

impl VoiceParameters {
    /// Total circular roll applied when reading the input.
    pub fn total_offset(&self) -> i64 {
        self.frame_shift + self.random_delay as i64
    }
}

/// Floor a product of decimal inputs.
///
/// Values within rounding noise of a whole number count as that number, so
/// 44100 × 0.7 floors to 30870 even though the f64 product is 30869.999…
pub fn floor_decimal(x: f64) -> i64 {
    let nearest = x.round();
    if (x - nearest).abs() <= 1e-9 * nearest.abs().max(1.0) {
        nearest as i64
    } else {
        x.floor() as i64
    }
}

/// Whole-clip frame shift for a pitch offset, floored toward negative infinity.
pub fn frame_shift(pitch_offset: f64, total_frames: usize) -> i64 {
    floor_decimal(pitch_offset * total_frames as f64 / SHIFT_DIVISOR)
}

/// Longest random delay in frames: `floor(sample_rate * max_delay_seconds)`.
pub fn max_delay_samples(sample_rate: u32, max_delay_seconds: f64) -> u64 {
    floor_decimal(f64::from(sample_rate) * max_delay_seconds).max(0) as u64
}

/// Lay out every voice of the choir.
///
/// Delays are drawn from `rng` in voice order, one per voice. A
/// `max_delay_seconds` that rounds to zero samples gives every voice a delay
/// of exactly 0.
pub fn plan_voices<R: Rng + ?Sized>(
    num_voices: usize,
    pitch_step: f64,
    max_delay_seconds: f64,
    total_frames: usize,
    sample_rate: u32,
    rng: &mut R,
) -> Vec<VoiceParameters> {
    let max_delay = max_delay_samples(sample_rate, max_delay_seconds);

    generate_offsets(num_voices, pitch_step)
        .into_iter()
        .enumerate()
        .map(|(index, pitch_offset)| {
            let random_delay = rng.random_range(0..=max_delay);
            let voice = VoiceParameters {
                index,
                pitch_offset,
                frame_shift: frame_shift(pitch_offset, total_frames),
                random_delay,
                output_channel: index % 2,
            };
            debug!(
                "voice {}: offset {:+} shift {} delay {} -> channel {}",
                voice.index,
                voice.pitch_offset,
                voice.frame_shift,
                voice.random_delay,
                voice.output_channel
            );
            voice
        })
        .collect()
}

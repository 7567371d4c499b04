//! Pitch offsets — one evenly spaced offset per voice, centered near zero.

/// Generate `num_voices` pitch offsets spaced `pitch_step` apart.
///
/// Odd counts are centered exactly on zero (3 voices, step 3 → `[-3, 0, 3]`).
/// Even counts start at `-((n / 2) - 1) * step` with integer division, so
/// they lean upward (2 voices, step 3 → `[0, 3]`; 4 voices → `[-3, 0, 3, 6]`).
/// That lean is part of the effect's sound and is kept as-is.
///
/// Callers are expected to pass `num_voices >= 1` and `pitch_step` in [1, 12].
pub fn generate_offsets(num_voices: usize, pitch_step: f64) -> Vec<f64> {
    let start = if num_voices % 2 == 0 {
        -(((num_voices / 2) as f64) - 1.0) * pitch_step
    } else {
        -((num_voices as f64 - 1.0) / 2.0) * pitch_step
    };

    (0..num_voices)
        .map(|i| start + i as f64 * pitch_step)
        .collect()
}

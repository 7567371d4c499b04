//! Peak normalization with a hard clip safety net.

use log::warn;

/// Peak absolute value of a signal.
pub fn peak(signal: &[f32]) -> f32 {
    signal.iter().map(|x| x.abs()).fold(0.0f32, f32::max)
}

/// Rescale `samples` in place so the loudest one sits at `target_peak`,
/// then clamp everything to [-1, 1].
///
/// A silent buffer is left untouched.
pub fn normalize(samples: &mut [f32], target_peak: f32) {
    let max = peak(samples);
    if max == 0.0 {
        warn!("mix is silent, skipping normalization");
        return;
    }

    for sample in samples.iter_mut() {
        *sample = ((*sample / max) * target_peak).clamp(-1.0, 1.0);
    }
}

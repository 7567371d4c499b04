//! Choir renderer — validate, mix, normalize, and optionally encode to WAV.

use log::info;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::buffer::AudioBuffer;
use crate::error::Result;
use crate::params::ChoirParams;

use super::mixer::mix_planned;
use super::normalize::{normalize, peak};
use super::voice::{VoiceParameters, plan_voices};

/// Delay generator for `params`: seeded when a seed is given, otherwise
/// drawn from the thread-local entropy source.
pub fn delay_rng(params: &ChoirParams) -> Pcg64 {
    match params.seed {
        Some(seed) => Pcg64::seed_from_u64(seed),
        None => Pcg64::from_rng(&mut rand::rng()),
    }
}

/// Plan the voices `params` would produce for a clip of `total_frames`
/// frames, without mixing anything.
pub fn voice_plan(
    total_frames: usize,
    sample_rate: u32,
    params: &ChoirParams,
) -> Result<Vec<VoiceParameters>> {
    params.validate()?;
    let mut rng = delay_rng(params);
    Ok(plan_voices(
        params.num_voices,
        params.pitch_step,
        params.max_delay_seconds,
        total_frames,
        sample_rate,
        &mut rng,
    ))
}

/// Run the full choir pipeline with an explicit delay generator.
///
/// `params.seed` is ignored here; the caller owns the randomness.
pub fn render_with_rng<R: Rng + ?Sized>(
    input: &AudioBuffer,
    params: &ChoirParams,
    rng: &mut R,
) -> Result<AudioBuffer> {
    input.validate()?;
    params.validate()?;

    let voices = plan_voices(
        params.num_voices,
        params.pitch_step,
        params.max_delay_seconds,
        input.total_frames(),
        input.sample_rate,
        rng,
    );
    let mut output = mix_planned(input, &voices);

    info!(
        "mixed {} voices over {} frames at {} Hz ({} ch in), pre-normalization peak {:.4}",
        voices.len(),
        input.total_frames(),
        input.sample_rate,
        input.channels,
        peak(&output.samples)
    );

    normalize(&mut output.samples, params.target_peak);
    Ok(output)
}

/// Run the full choir pipeline, seeding the delay generator from
/// `params.seed` when present.
pub fn render(input: &AudioBuffer, params: &ChoirParams) -> Result<AudioBuffer> {
    let mut rng = delay_rng(params);
    render_with_rng(input, params, &mut rng)
}

/// Render the choir and encode it as a 16-bit stereo WAV byte buffer.
pub fn render_wav(input: &AudioBuffer, params: &ChoirParams) -> Result<Vec<u8>> {
    let output = render(input, params)?;
    Ok(encode_wav(&output))
}

/// Convert a float sample to 16-bit PCM, clamping to full scale.
#[inline]
pub fn to_pcm_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0) as i16
}

/// Encode a buffer to a WAV file as bytes (16-bit PCM, canonical 44-byte header).
///
/// Needs neither `hound` nor a filesystem, so it serves the WASM exports;
/// `wav::write_wav` writes these same bytes to disk.
pub fn encode_wav(buffer: &AudioBuffer) -> Vec<u8> {
    let channels = buffer.channels;
    let sample_rate = buffer.sample_rate;
    let bits_per_sample: u16 = 16;
    let byte_rate = sample_rate * channels as u32 * (bits_per_sample as u32 / 8);
    let block_align = channels * (bits_per_sample / 8);
    let data_size = (buffer.samples.len() * 2) as u32;
    let file_size = 36 + data_size;

    let mut buf = Vec::with_capacity(44 + data_size as usize);

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&file_size.to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
    buf.extend_from_slice(&channels.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    for &sample in &buffer.samples {
        buf.extend_from_slice(&to_pcm_i16(sample).to_le_bytes());
    }

    buf
}

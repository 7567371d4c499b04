//! WAV file I/O using hound.
//!
//! Decodes mono or stereo WAV files into an [`AudioBuffer`] and writes
//! rendered buffers back out as 16-bit PCM, using the same encoder as the
//! in-memory WASM path.

use std::path::Path;

use hound::{SampleFormat, WavReader};
use log::debug;

use crate::buffer::AudioBuffer;
use crate::dsp::renderer::encode_wav;
use crate::error::{ChoirError, Result};

/// Read a WAV file into interleaved f32 samples, keeping its channel layout.
///
/// Integer PCM is scaled by `1 / 2^(bits - 1)`.
pub fn read_wav(path: impl AsRef<Path>) -> Result<AudioBuffer> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = reader.spec();

    if spec.channels != 1 && spec.channels != 2 {
        return Err(ChoirError::Wav(format!(
            "{}: only mono or stereo input is supported, found {} channels",
            path.display(),
            spec.channels
        )));
    }

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<_, _>>()?
        }
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<_, _>>()?,
    };

    let buffer = AudioBuffer::new(samples, spec.sample_rate, spec.channels)?;
    debug!(
        "read {}: {} Hz, {} ch, {} bit {:?}, {:.2}s",
        path.display(),
        spec.sample_rate,
        spec.channels,
        spec.bits_per_sample,
        spec.sample_format,
        buffer.duration_secs()
    );
    Ok(buffer)
}

/// Write a buffer to a 16-bit PCM WAV file.
pub fn write_wav(path: impl AsRef<Path>, buffer: &AudioBuffer) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, encode_wav(buffer))?;
    debug!("wrote {}: {:.2}s", path.display(), buffer.duration_secs());
    Ok(())
}

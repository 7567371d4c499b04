pub mod buffer;
pub mod dsp;
pub mod error;
pub mod params;
#[cfg(feature = "wav")]
pub mod wav;

pub use crate::buffer::AudioBuffer;
pub use crate::dsp::voice::VoiceParameters;
pub use crate::error::{ChoirError, Result};
pub use crate::params::ChoirParams;

use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the choirboy-core version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// Turn a decoded clip into a normalized stereo choir.
pub fn render_choir(input: &AudioBuffer, params: &ChoirParams) -> Result<AudioBuffer> {
    dsp::renderer::render(input, params)
}

/// Build the input buffer from raw interleaved samples and render the choir.
pub fn render_interleaved(
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
    params: &ChoirParams,
) -> Result<AudioBuffer> {
    let input = AudioBuffer::new(samples, sample_rate, channels)?;
    render_choir(&input, params)
}

fn params_from_js(params: JsValue) -> std::result::Result<ChoirParams, JsValue> {
    let params: ChoirParams = if params.is_undefined() || params.is_null() {
        ChoirParams::default()
    } else {
        serde_wasm_bindgen::from_value(params).map_err(|e| JsValue::from_str(&format!("{e}")))?
    };
    Ok(params)
}

fn to_js_err(e: ChoirError) -> JsValue {
    JsValue::from_str(&format!("{e}"))
}

/// WASM-exposed: render interleaved input samples to interleaved stereo
/// choir samples. `params` is a `ChoirParams` object (camelCase keys);
/// missing keys take their defaults.
#[wasm_bindgen]
pub fn choir_samples(
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
    params: JsValue,
) -> std::result::Result<Vec<f32>, JsValue> {
    let params = params_from_js(params)?;
    render_interleaved(samples, sample_rate, channels, &params)
        .map(|out| out.samples)
        .map_err(to_js_err)
}

/// WASM-exposed: render the choir and return it as a 16-bit WAV byte array.
#[wasm_bindgen]
pub fn choir_wav(
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
    params: JsValue,
) -> std::result::Result<Vec<u8>, JsValue> {
    let params = params_from_js(params)?;
    render_interleaved(samples, sample_rate, channels, &params)
        .map(|out| dsp::renderer::encode_wav(&out))
        .map_err(to_js_err)
}

/// WASM-exposed: the per-voice shift, delay, and channel layout `params`
/// would use for a clip of `total_frames` frames.
#[wasm_bindgen]
pub fn choir_voice_plan(
    total_frames: usize,
    sample_rate: u32,
    params: JsValue,
) -> std::result::Result<JsValue, JsValue> {
    let params = params_from_js(params)?;
    let plan = dsp::renderer::voice_plan(total_frames, sample_rate, &params).map_err(to_js_err)?;
    serde_wasm_bindgen::to_value(&plan).map_err(|e| JsValue::from_str(&format!("{e}")))
}

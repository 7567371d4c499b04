//! Choir parameters — the three user-facing knobs plus output level and seed.
//!
//! These map directly to the JSON object accepted by the WASM entry points.

use serde::{Deserialize, Serialize};

use crate::error::{ChoirError, Result};

pub const PITCH_STEP_RANGE: (f64, f64) = (1.0, 12.0);
pub const NUM_VOICES_RANGE: (usize, usize) = (1, 12);
pub const MAX_DELAY_MS_RANGE: (f64, f64) = (0.0, 1000.0);

/// Peak level the normalizer scales the mix to.
pub const DEFAULT_TARGET_PEAK: f32 = 0.9;

/// Settings for one choir render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoirParams {
    /// Spacing between neighbouring voices' pitch offsets, in [1, 12].
    #[serde(default = "default_pitch_step")]
    pub pitch_step: f64,
    /// Number of layered voices, in [1, 12].
    #[serde(default = "default_num_voices")]
    pub num_voices: usize,
    /// Upper bound of each voice's random onset delay, in [0, 1] seconds.
    #[serde(default = "default_max_delay_seconds")]
    pub max_delay_seconds: f64,
    /// Peak absolute amplitude after normalization, in (0, 1].
    #[serde(default = "default_target_peak")]
    pub target_peak: f32,
    /// Seed for the delay generator. `None` draws one from entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_pitch_step() -> f64 {
    3.0
}
fn default_num_voices() -> usize {
    4
}
fn default_max_delay_seconds() -> f64 {
    0.05
}
fn default_target_peak() -> f32 {
    DEFAULT_TARGET_PEAK
}

impl Default for ChoirParams {
    fn default() -> Self {
        Self {
            pitch_step: default_pitch_step(),
            num_voices: default_num_voices(),
            max_delay_seconds: default_max_delay_seconds(),
            target_peak: default_target_peak(),
            seed: None,
        }
    }
}

impl ChoirParams {
    pub fn new(pitch_step: f64, num_voices: usize, max_delay_seconds: f64) -> Self {
        Self {
            pitch_step,
            num_voices,
            max_delay_seconds,
            ..Self::default()
        }
    }

    /// Build parameters from a delay given in milliseconds.
    pub fn with_delay_ms(pitch_step: f64, num_voices: usize, max_delay_ms: f64) -> Self {
        Self::new(pitch_step, num_voices, max_delay_ms / 1000.0)
    }

    /// Fix the delay generator seed for reproducible output.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse parameters from JSON, filling gaps with defaults, then validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: ChoirParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Check every field against its documented range.
    pub fn validate(&self) -> Result<()> {
        let (lo, hi) = PITCH_STEP_RANGE;
        if !self.pitch_step.is_finite() || self.pitch_step < lo || self.pitch_step > hi {
            return Err(ChoirError::InvalidParams(format!(
                "pitch step must be between {lo} and {hi}, got {}",
                self.pitch_step
            )));
        }

        let (lo, hi) = NUM_VOICES_RANGE;
        if self.num_voices < lo || self.num_voices > hi {
            return Err(ChoirError::InvalidParams(format!(
                "number of voices must be between {lo} and {hi}, got {}",
                self.num_voices
            )));
        }

        let (lo_ms, hi_ms) = MAX_DELAY_MS_RANGE;
        let delay_ms = self.max_delay_seconds * 1000.0;
        if !delay_ms.is_finite() || delay_ms < lo_ms || delay_ms > hi_ms {
            return Err(ChoirError::InvalidParams(format!(
                "max delay must be between {lo_ms} and {hi_ms} ms, got {delay_ms}"
            )));
        }

        if !self.target_peak.is_finite() || self.target_peak <= 0.0 || self.target_peak > 1.0 {
            return Err(ChoirError::InvalidParams(format!(
                "target peak must be in (0, 1], got {}",
                self.target_peak
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let p = ChoirParams::default();
        assert!(p.validate().is_ok());
        assert_eq!(p.target_peak, 0.9);
        assert_eq!(p.seed, None);
    }

    #[test]
    fn delay_ms_converts_to_seconds() {
        let p = ChoirParams::with_delay_ms(2.0, 3, 250.0);
        assert!((p.max_delay_seconds - 0.25).abs() < 1e-6);
    }

    #[test]
    fn range_boundaries_accepted() {
        assert!(ChoirParams::with_delay_ms(1.0, 1, 0.0).validate().is_ok());
        assert!(ChoirParams::with_delay_ms(12.0, 12, 1000.0).validate().is_ok());
    }

    #[test]
    fn out_of_range_rejected() {
        assert!(ChoirParams::new(0.5, 4, 0.0).validate().is_err());
        assert!(ChoirParams::new(12.5, 4, 0.0).validate().is_err());
        assert!(ChoirParams::new(3.0, 0, 0.0).validate().is_err());
        assert!(ChoirParams::new(3.0, 13, 0.0).validate().is_err());
        assert!(ChoirParams::new(3.0, 4, -0.001).validate().is_err());
        assert!(ChoirParams::new(3.0, 4, 1.5).validate().is_err());
        assert!(ChoirParams::new(f64::NAN, 4, 0.0).validate().is_err());

        let mut p = ChoirParams::default();
        p.target_peak = 0.0;
        assert!(p.validate().is_err());
        p.target_peak = 1.1;
        assert!(p.validate().is_err());
    }

    #[test]
    fn json_uses_camel_case_and_defaults() {
        let p = ChoirParams::from_json(r#"{"pitchStep": 5, "numVoices": 6, "seed": 42}"#).unwrap();
        assert_eq!(p.pitch_step, 5.0);
        assert_eq!(p.num_voices, 6);
        assert_eq!(p.max_delay_seconds, 0.05);
        assert_eq!(p.target_peak, 0.9);
        assert_eq!(p.seed, Some(42));
    }

    #[test]
    fn json_validation_and_syntax_errors() {
        let err = ChoirParams::from_json(r#"{"numVoices": 20}"#).unwrap_err();
        assert!(matches!(err, ChoirError::InvalidParams(_)));

        let err = ChoirParams::from_json("{not json").unwrap_err();
        assert!(matches!(err, ChoirError::Json(_)));
    }
}

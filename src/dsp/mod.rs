//! DSP — the choir transform, stage by stage.
//!
//! Pitch offsets feed the voice planner, the mixer layers one rolled copy
//! of the input per voice into a stereo buffer, and the normalizer brings
//! the result to a safe playback level. Everything runs offline on a fully
//! decoded clip.

pub mod circular;
pub mod mixer;
pub mod normalize;
pub mod offsets;
pub mod renderer;
pub mod voice;

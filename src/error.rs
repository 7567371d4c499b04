use std::io;
use thiserror::Error;

/// Errors raised at the edges of the choir pipeline.
///
/// The DSP stages themselves never fail; these only come from buffer or
/// parameter validation and from file I/O.
#[derive(Error, Debug)]
pub enum ChoirError {
    /// The sample buffer does not describe whole mono or stereo frames.
    #[error("Invalid audio buffer: {0}")]
    InvalidBuffer(String),

    /// A choir parameter is outside its documented range.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Parameters could not be decoded from JSON.
    #[error("Malformed parameters: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while reading or writing audio files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The WAV container was readable but its contents were not usable.
    #[error("WAV error: {0}")]
    Wav(String),
}

pub type Result<T> = std::result::Result<T, ChoirError>;

#[cfg(feature = "wav")]
impl From<hound::Error> for ChoirError {
    fn from(e: hound::Error) -> Self {
        match e {
            hound::Error::IoError(io) => ChoirError::Io(io),
            other => ChoirError::Wav(other.to_string()),
        }
    }
}

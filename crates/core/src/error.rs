//! Error taxonomy for the interview backend
//!
//! Each seam gets its own typed failure enum; `Error` is the top-level type
//! the turn orchestrator returns to the HTTP surface. Transcription errors
//! never reach `Error`: the degraded-success policy replaces them with a
//! placeholder utterance so the interview can continue.

use thiserror::Error;

/// Top-level error for interview turn processing
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or empty required request fields. User-correctable, maps to
    /// a 4xx status and never triggers a side effect.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The hosted interview model could not be reached. Retriable.
    #[error("interview model unreachable: {0}")]
    ModelUnreachable(String),

    /// The hosted interview model was reached but the call failed.
    #[error("interview model error: {0}")]
    Model(String),

    /// Uploaded audio could not be converted to the canonical waveform.
    #[error("media conversion failed: {0}")]
    Media(#[from] ConversionError),

    /// Speech synthesis failed.
    #[error("speech synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<ModelError> for Error {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Unreachable(detail) => Error::ModelUnreachable(detail),
            other => Error::Model(other.to_string()),
        }
    }
}

/// Failures of the media conversion adapter
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The conversion engine (ffmpeg) is missing or could not be spawned.
    #[error("conversion engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The upload names a container the converter refuses outright.
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// The engine ran but could not decode the stream.
    #[error("corrupt or undecodable audio stream: {0}")]
    CorruptStream(String),

    /// The engine did not finish within the configured bound.
    #[error("conversion timed out after {0} ms")]
    Timeout(u64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the speech-to-text adapter
#[derive(Error, Debug)]
pub enum TranscriptionError {
    /// The service answered but recognized no speech.
    #[error("no discernible speech in audio")]
    Inaudible,

    /// The service could not be reached or failed server-side.
    #[error("transcription service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Anything else.
    #[error("transcription failed: {0}")]
    Failed(String),
}

impl TranscriptionError {
    /// Placeholder utterance substituted when transcription fails.
    ///
    /// The orchestrator treats a failed transcription as degraded success:
    /// the placeholder stands in for the candidate's words and the turn
    /// proceeds instead of aborting the interview.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Inaudible => "(Could not understand - please speak clearly)",
            Self::ServiceUnavailable(_) => "(Transcription service unavailable - please repeat)",
            Self::Failed(_) => "(Error during transcription)",
        }
    }
}

/// Failures of the text-to-speech adapter
#[derive(Error, Debug)]
pub enum SynthesisError {
    /// The synthesis engine could not be reached.
    #[error("synthesis engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The engine was reached but rejected the request.
    #[error("synthesis engine error: {0}")]
    Engine(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the hosted interview model client
#[derive(Error, Debug)]
pub enum ModelError {
    /// No connection to the model endpoint could be established. Retriable;
    /// surfaces to callers as a 503.
    #[error("model endpoint unreachable: {0}")]
    Unreachable(String),

    /// The remote call completed but reported an error.
    #[error("model API error: {0}")]
    Api(String),

    /// The remote payload did not match the expected shape.
    #[error("invalid model response: {0}")]
    InvalidResponse(String),

    /// The call did not finish within the configured bound.
    #[error("model request timed out")]
    Timeout,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

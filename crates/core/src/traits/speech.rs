//! Speech processing traits

use crate::conversation::SpokenArtifact;
use crate::error::{ConversionError, SynthesisError, TranscriptionError};
use async_trait::async_trait;

/// Speech-to-Text interface
///
/// # Example
///
/// ```ignore
/// let stt: Arc<dyn SpeechToText> = Arc::new(HttpSttAdapter::new(config)?);
/// let text = stt.transcribe(&wav_bytes).await?;
/// ```
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe a canonical mono WAV clip.
    ///
    /// Failures are typed so the caller can apply the degraded-success
    /// policy (see [`TranscriptionError::placeholder`]).
    async fn transcribe(&self, wav: &[u8]) -> Result<String, TranscriptionError>;

    /// Engine name for logging
    fn engine_name(&self) -> &str;
}

/// Text-to-Speech interface
///
/// Implementations must always produce audio for every turn: input that is
/// empty after stripping markup is replaced with a fixed fallback phrase
/// rather than rejected.
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize `text` and store it as an audio artifact.
    ///
    /// `prefix` seeds the artifact file name; the implementation appends a
    /// timestamp and a uniqueness suffix so concurrent requests never
    /// collide.
    async fn synthesize(&self, text: &str, prefix: &str)
        -> Result<SpokenArtifact, SynthesisError>;

    /// Engine name for logging
    fn engine_name(&self) -> &str;
}

/// Converts an arbitrary recorded audio container to the canonical waveform
/// (16 kHz mono WAV) used by transcription.
#[async_trait]
pub trait MediaConverter: Send + Sync {
    /// Convert `input` to canonical WAV bytes.
    ///
    /// `format_hint` is the container extension from the upload, if known.
    /// Implementations may stage scoped temporary files but must remove
    /// them on every exit path, success or failure. No retries: a failure
    /// surfaces immediately.
    async fn to_canonical_wav(
        &self,
        input: &[u8],
        format_hint: Option<&str>,
    ) -> Result<Vec<u8>, ConversionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockStt;

    #[async_trait]
    impl SpeechToText for MockStt {
        async fn transcribe(&self, wav: &[u8]) -> Result<String, TranscriptionError> {
            if wav.is_empty() {
                return Err(TranscriptionError::Inaudible);
            }
            Ok("test transcription".to_string())
        }

        fn engine_name(&self) -> &str {
            "mock-stt"
        }
    }

    #[tokio::test]
    async fn test_mock_stt_contract() {
        let stt = MockStt;
        assert_eq!(stt.transcribe(b"audio").await.unwrap(), "test transcription");

        let err = stt.transcribe(b"").await.unwrap_err();
        assert!(matches!(err, TranscriptionError::Inaudible));
        assert!(!err.placeholder().is_empty());
    }
}

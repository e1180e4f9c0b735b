//! HTTP speech-to-text adapter
//!
//! Sends the canonical waveform to a remote transcription service as a
//! multipart upload. Failures are typed so the orchestrator can apply the
//! degraded-success policy instead of aborting the turn.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use ai_interviewer_core::{SpeechToText, TranscriptionError};

/// Transcription service configuration
#[derive(Debug, Clone)]
pub struct HttpSttConfig {
    /// Base URL of the transcription service
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HttpSttConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8091".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Response from the transcription service
#[derive(Debug, Deserialize)]
struct SttResponse {
    text: String,
    #[serde(default)]
    confidence: Option<f32>,
}

/// HTTP transcription adapter
pub struct HttpSttAdapter {
    config: HttpSttConfig,
    client: reqwest::Client,
}

impl HttpSttAdapter {
    pub fn new(config: HttpSttConfig) -> Result<Self, TranscriptionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TranscriptionError::Failed(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl SpeechToText for HttpSttAdapter {
    async fn transcribe(&self, wav: &[u8]) -> Result<String, TranscriptionError> {
        let part = reqwest::multipart::Part::bytes(wav.to_vec())
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| TranscriptionError::Failed(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/transcribe", self.config.url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ServiceUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.is_server_error() {
                return Err(TranscriptionError::ServiceUnavailable(format!(
                    "{status}: {body}"
                )));
            }
            return Err(TranscriptionError::Failed(format!("{status}: {body}")));
        }

        let body: SttResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::Failed(format!("unparseable response: {e}")))?;

        let text = body.text.trim();
        if text.is_empty() {
            return Err(TranscriptionError::Inaudible);
        }

        tracing::info!(
            confidence = ?body.confidence,
            preview = %text.chars().take(80).collect::<String>(),
            "transcribed candidate audio"
        );
        Ok(text.to_string())
    }

    fn engine_name(&self) -> &str {
        "http-stt"
    }
}

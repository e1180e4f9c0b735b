//! HTTP text-to-speech adapter
//!
//! Posts response text to a synthesis engine and stores the returned MP3
//! under the audio directory. Artifact names carry a timestamp plus a
//! uniqueness suffix; concurrent requests must never collide, and the
//! timestamp doubles as the cache-busting query parameter in the URL.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use ai_interviewer_core::{SpokenArtifact, SynthesisError, TextToSpeech, EMPTY_SPEECH_FALLBACK};

/// Synthesis engine configuration
#[derive(Debug, Clone)]
pub struct HttpTtsConfig {
    /// Base URL of the synthesis engine
    pub url: String,
    /// Voice/language code
    pub voice: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Directory artifacts are written to
    pub audio_dir: PathBuf,
    /// Public URL prefix the artifacts are served under
    pub public_base: String,
}

impl Default for HttpTtsConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8092".to_string(),
            voice: "en".to_string(),
            timeout_secs: 30,
            audio_dir: PathBuf::from("static/audio"),
            public_base: "/static/audio".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    voice: &'a str,
}

/// HTTP synthesis adapter
pub struct HttpTtsAdapter {
    config: HttpTtsConfig,
    client: reqwest::Client,
}

impl HttpTtsAdapter {
    pub fn new(config: HttpTtsConfig) -> Result<Self, SynthesisError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SynthesisError::Engine(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }
}

/// Strip Markdown emphasis markers and trim; empty input becomes the fixed
/// fallback phrase so synthesis always produces audio.
fn clean_for_speech(text: &str) -> String {
    let cleaned = text.replace("**", "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        EMPTY_SPEECH_FALLBACK.to_string()
    } else {
        cleaned.to_string()
    }
}

#[async_trait]
impl TextToSpeech for HttpTtsAdapter {
    async fn synthesize(
        &self,
        text: &str,
        prefix: &str,
    ) -> Result<SpokenArtifact, SynthesisError> {
        let speech_text = clean_for_speech(text);

        let response = self
            .client
            .post(format!("{}/synthesize", self.config.url))
            .json(&SynthesizeRequest {
                text: &speech_text,
                voice: &self.config.voice,
            })
            .send()
            .await
            .map_err(|e| SynthesisError::EngineUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Engine(format!("{status}: {body}")));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::Engine(format!("truncated audio body: {e}")))?;

        tokio::fs::create_dir_all(&self.config.audio_dir).await?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string();
        let unique = uuid::Uuid::new_v4().simple().to_string();
        let file_name = format!("{prefix}_{timestamp}_{}.mp3", &unique[..8]);
        tokio::fs::write(self.config.audio_dir.join(&file_name), &audio).await?;

        let url = format!(
            "{}/{file_name}?v={timestamp}",
            self.config.public_base.trim_end_matches('/')
        );

        tracing::info!(
            file = %file_name,
            bytes = audio.len(),
            preview = %speech_text.chars().take(50).collect::<String>(),
            "synthesized response audio"
        );
        Ok(SpokenArtifact { file_name, url })
    }

    fn engine_name(&self) -> &str {
        "http-tts"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn engine_mock() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/synthesize"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3 fake mp3".to_vec()))
            .mount(&server)
            .await;
        server
    }

    fn adapter_for(server: &MockServer, audio_dir: &std::path::Path) -> HttpTtsAdapter {
        HttpTtsAdapter::new(HttpTtsConfig {
            url: server.uri(),
            audio_dir: audio_dir.to_path_buf(),
            timeout_secs: 5,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_clean_for_speech() {
        assert_eq!(clean_for_speech("**Hello** there"), "Hello there");
        assert_eq!(clean_for_speech("  plain  "), "plain");
        assert_eq!(clean_for_speech(""), EMPTY_SPEECH_FALLBACK);
        assert_eq!(clean_for_speech(" ** ** "), EMPTY_SPEECH_FALLBACK);
    }

    #[tokio::test]
    async fn test_synthesize_writes_artifact_with_cache_buster() {
        let server = engine_mock().await;
        let dir = tempfile::tempdir().unwrap();
        let tts = adapter_for(&server, dir.path());

        let artifact = tts.synthesize("**Tell** me more", "question").await.unwrap();
        assert!(artifact.file_name.starts_with("question_"));
        assert!(artifact.file_name.ends_with(".mp3"));
        assert!(artifact.url.contains("?v="));
        assert!(artifact.url.starts_with("/static/audio/"));

        let stored = std::fs::read(dir.path().join(&artifact.file_name)).unwrap();
        assert_eq!(stored, b"ID3 fake mp3");
    }

    #[tokio::test]
    async fn test_empty_text_synthesizes_fallback_phrase() {
        let server = engine_mock().await;
        let dir = tempfile::tempdir().unwrap();
        let tts = adapter_for(&server, dir.path());

        let artifact = tts.synthesize(" ** ", "question").await.unwrap();
        assert!(dir.path().join(&artifact.file_name).exists());

        // The engine must have been asked to speak the fallback, not silence.
        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["text"], EMPTY_SPEECH_FALLBACK);
    }

    #[tokio::test]
    async fn test_concurrent_synthesis_never_collides() {
        let server = engine_mock().await;
        let dir = tempfile::tempdir().unwrap();
        let tts = adapter_for(&server, dir.path());

        let (a, b) = tokio::join!(
            tts.synthesize("first reply", "question"),
            tts.synthesize("second reply", "question"),
        );
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_ne!(a.file_name, b.file_name);
        assert!(dir.path().join(&a.file_name).exists());
        assert!(dir.path().join(&b.file_name).exists());
    }

    #[tokio::test]
    async fn test_engine_down_is_unavailable() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let tts = adapter_for(&server, dir.path());
        drop(server);

        let err = tts.synthesize("hello", "question").await.unwrap_err();
        assert!(matches!(err, SynthesisError::EngineUnavailable(_)));
    }
}

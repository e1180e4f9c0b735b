//! In-process API tests
//!
//! Drives the real router and the real orchestrator over in-memory fakes,
//! checking the HTTP contract: response shapes, validation 400s, and the
//! upstream status mapping.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use ai_interviewer_agent::TurnOrchestrator;
use ai_interviewer_config::Settings;
use ai_interviewer_core::{
    ConversionError, InterviewModel, MediaConverter, ModelError, SpeechToText, SpokenArtifact,
    SynthesisError, TextToSpeech, TranscriptionError,
};
use ai_interviewer_server::{create_router, AppState};

struct FakeModel {
    transcript: &'static str,
    reachable: bool,
}

#[async_trait]
impl InterviewModel for FakeModel {
    async fn begin_interview(
        &self,
        _resume: &std::path::Path,
        _job_description: &str,
    ) -> Result<String, ModelError> {
        if !self.reachable {
            return Err(ModelError::Unreachable("connection refused".to_string()));
        }
        Ok(self.transcript.to_string())
    }

    async fn continue_interview(&self, utterance: &str) -> Result<String, ModelError> {
        if !self.reachable {
            return Err(ModelError::Unreachable("connection refused".to_string()));
        }
        Ok(format!("{utterance}. Interesting, go on."))
    }

    fn is_connected(&self) -> bool {
        self.reachable
    }
}

struct FakeConverter;

#[async_trait]
impl MediaConverter for FakeConverter {
    async fn to_canonical_wav(
        &self,
        _input: &[u8],
        _format_hint: Option<&str>,
    ) -> Result<Vec<u8>, ConversionError> {
        Ok(b"RIFF-wav".to_vec())
    }
}

struct FakeStt;

#[async_trait]
impl SpeechToText for FakeStt {
    async fn transcribe(&self, _wav: &[u8]) -> Result<String, TranscriptionError> {
        Ok("I enjoy systems programming".to_string())
    }

    fn engine_name(&self) -> &str {
        "fake-stt"
    }
}

struct FakeTts;

#[async_trait]
impl TextToSpeech for FakeTts {
    async fn synthesize(
        &self,
        _text: &str,
        prefix: &str,
    ) -> Result<SpokenArtifact, SynthesisError> {
        Ok(SpokenArtifact {
            file_name: format!("{prefix}_test.mp3"),
            url: format!("/static/audio/{prefix}_test.mp3?v=test"),
        })
    }

    fn engine_name(&self) -> &str {
        "fake-tts"
    }
}

fn app(reachable: bool) -> axum::Router {
    let model = Arc::new(FakeModel {
        transcript: "Welcome to your interview.\nWhat draws you to Rust?",
        reachable,
    });
    let orchestrator = TurnOrchestrator::new(
        model.clone(),
        Arc::new(FakeConverter),
        Arc::new(FakeStt),
        Arc::new(FakeTts),
    );
    create_router(AppState::new(Settings::default(), orchestrator, model))
}

/// Hand-built multipart body: (field name, optional file name, content)
fn multipart_body(fields: &[(&str, Option<&str>, &[u8])]) -> (String, Vec<u8>) {
    let boundary = "interview-test-boundary";
    let mut body = Vec::new();
    for (name, file_name, data) in fields {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}

async fn post_multipart(
    app: axum::Router,
    uri: &str,
    fields: &[(&str, Option<&str>, &[u8])],
) -> (StatusCode, serde_json::Value) {
    let (content_type, body) = multipart_body(fields);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_reports_model_status() {
    let response = app(true)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["model"], "connected");

    let response = app(false)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["model"], "disconnected");
}

#[tokio::test]
async fn test_start_interview_happy_path() {
    let (status, json) = post_multipart(
        app(true),
        "/start-interview",
        &[
            ("resume", Some("cv.pdf"), b"%PDF resume bytes"),
            ("job_description", None, b"Senior Rust engineer"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["first_question"], "What draws you to Rust?");
    assert!(json["conversation"]
        .as_str()
        .unwrap()
        .starts_with("Welcome to your interview."));
    assert!(json["audio_url"].as_str().unwrap().contains("/static/audio/"));
}

#[tokio::test]
async fn test_start_interview_missing_fields_is_400() {
    let (status, json) = post_multipart(
        app(true),
        "/start-interview",
        &[("resume", Some("cv.pdf"), b"%PDF resume bytes")],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("job description"));

    let (status, _) = post_multipart(
        app(true),
        "/start-interview",
        &[("job_description", None, b"Senior Rust engineer")],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_start_interview_empty_job_description_is_400() {
    let (status, _) = post_multipart(
        app(true),
        "/start-interview",
        &[
            ("resume", Some("cv.pdf"), b"%PDF resume bytes"),
            ("job_description", None, b"   "),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_start_interview_unreachable_model_is_503() {
    let (status, json) = post_multipart(
        app(false),
        "/start-interview",
        &[
            ("resume", Some("cv.pdf"), b"%PDF resume bytes"),
            ("job_description", None, b"Senior Rust engineer"),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(json["error"].as_str().unwrap().contains("unreachable"));
}

#[tokio::test]
async fn test_process_response_happy_path() {
    let (status, json) = post_multipart(
        app(true),
        "/process-response",
        &[
            ("audio", Some("clip.webm"), b"opus-bytes"),
            ("conversation_history", None, b"**AI:** What draws you to Rust?"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["transcription"], "I enjoy systems programming");
    assert_eq!(json["ai_response"], "Interesting, go on.");
    let conversation = json["conversation"].as_str().unwrap();
    assert!(conversation.contains("**You:** I enjoy systems programming"));
    assert!(conversation.ends_with("**AI:** Interesting, go on."));
}

#[tokio::test]
async fn test_process_response_missing_audio_is_400() {
    let (status, _) = post_multipart(
        app(true),
        "/process-response",
        &[("conversation_history", None, b"**AI:** Hello")],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_end_interview_acknowledges() {
    let response = app(true)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/end-interview")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"conversation": "..."}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], true);
}

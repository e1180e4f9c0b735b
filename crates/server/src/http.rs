//! HTTP endpoints
//!
//! REST API for the interview service: start an interview, process one
//! candidate response, end the session, health. Synthesized audio is
//! served as static files under /static/audio.

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use ai_interviewer_core::{Error, InterviewModel};

use crate::state::AppState;

/// Uploads carry a resume or an audio clip; keep the cap well above both.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(
        &state.settings.server.cors_origins,
        state.settings.server.cors_enabled,
    );
    let audio_dir = state.settings.audio.dir.clone();

    Router::new()
        .route("/health", get(health_check))
        .route("/start-interview", post(start_interview))
        .route("/process-response", post(process_response))
        .route("/end-interview", post(end_interview))
        .nest_service("/static/audio", ServeDir::new(audio_dir))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns a permissive layer (for dev)
/// - If cors_origins is empty, defaults to localhost:3000
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin("http://localhost:3000".parse::<HeaderValue>().unwrap())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Error payload with the service's status mapping: validation failures are
/// the caller's to fix (400), an unreachable model is retriable (503),
/// everything else is a 500.
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::ModelUnreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "interview turn failed");
        } else {
            tracing::warn!(error = %self.0, "rejected request");
        }
        (
            status,
            Json(serde_json::json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

fn bad_multipart(err: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError(Error::InvalidRequest(format!(
        "malformed multipart body: {err}"
    )))
}

fn missing(field: &str) -> ApiError {
    ApiError(Error::InvalidRequest(format!("missing {field}")))
}

/// Health check: always answers, reports model connection status
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let model_status = if state.model.is_connected() {
        "connected"
    } else {
        "disconnected"
    };
    Json(serde_json::json!({
        "status": "healthy",
        "model": model_status,
        "service": "AI Interview Service",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// POST /start-interview
///
/// Multipart form: `resume` (binary document) + `job_description` (text).
async fn start_interview(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut resume: Option<(String, Vec<u8>)> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("resume") => {
                let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                resume = Some((file_name, bytes.to_vec()));
            }
            Some("job_description") => {
                job_description = Some(field.text().await.map_err(bad_multipart)?);
            }
            _ => {}
        }
    }

    let (resume_name, resume_bytes) = resume.ok_or_else(|| missing("resume file"))?;
    let job_description = job_description.ok_or_else(|| missing("job description"))?;

    let start = state
        .orchestrator
        .start_interview(&resume_name, &resume_bytes, &job_description)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "conversation": start.conversation,
        "audio_url": start.audio.url,
        "first_question": start.first_question,
    })))
}

/// POST /process-response
///
/// Multipart form: `audio` (recorded clip) + `conversation_history` (text).
async fn process_response(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut audio: Option<(Option<String>, Vec<u8>)> = None;
    let mut history: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("audio") => {
                let hint = field
                    .file_name()
                    .and_then(|name| name.rsplit_once('.'))
                    .map(|(_, ext)| ext.to_string());
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                audio = Some((hint, bytes.to_vec()));
            }
            Some("conversation_history") => {
                history = Some(field.text().await.map_err(bad_multipart)?);
            }
            _ => {}
        }
    }

    let (format_hint, audio_bytes) = audio.ok_or_else(|| missing("audio recording"))?;
    let history = history.ok_or_else(|| missing("conversation history"))?;

    let turn = state
        .orchestrator
        .process_response(&audio_bytes, format_hint.as_deref(), &history)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "transcription": turn.transcription,
        "ai_response": turn.ai_response,
        "audio_url": turn.audio.url,
        "conversation": turn.conversation,
    })))
}

/// POST /end-interview
///
/// Acknowledgment only: the caller owns the transcript, nothing is stored
/// server-side.
async fn end_interview(Json(_session): Json<serde_json::Value>) -> Json<serde_json::Value> {
    tracing::info!("interview ended by client");
    Json(serde_json::json!({
        "success": true,
        "message": "Interview session saved successfully",
    }))
}

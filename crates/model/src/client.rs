//! Hosted interview model client
//!
//! Speaks the hosted model's JSON RPC: `POST {endpoint}/run/{op}` with
//! `{"data": [...], "session_hash": "..."}`, answered by
//! `{"data": ["<transcript>"]}`. The session hash is generated locally;
//! all conversational state is keyed remotely or round-tripped by the
//! caller, so one shared handle is safe for concurrent requests.
//!
//! Connection lifecycle: `connect()` is attempted once at process start as
//! an optimization and is non-fatal on failure. Every operation goes
//! through `ensure_session()`, which reconnects lazily, so a transient
//! startup outage never wedges the service.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use ai_interviewer_core::{InterviewModel, ModelError};

/// Client configuration
#[derive(Debug, Clone)]
pub struct HostedModelConfig {
    /// Base URL of the hosted model
    pub endpoint: String,
    /// Operation name for starting an interview
    pub start_op: String,
    /// Operation name for continuing an interview
    pub continue_op: String,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
    /// Timeout for the connection probe in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HostedModelConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:7860".to_string(),
            start_op: "gradio_start_interview".to_string(),
            continue_op: "gradio_handle_response".to_string(),
            timeout_secs: 120,
            connect_timeout_secs: 10,
        }
    }
}

/// Opaque remote session handle
#[derive(Debug, Clone)]
struct ModelSession {
    session_hash: String,
}

#[derive(Debug, Serialize)]
struct PredictRequest {
    data: Vec<Value>,
    session_hash: String,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    data: Vec<Value>,
}

/// Client bound to one hosted interview model
pub struct HostedInterviewModel {
    config: HostedModelConfig,
    client: reqwest::Client,
    session: RwLock<Option<ModelSession>>,
}

impl HostedInterviewModel {
    pub fn new(config: HostedModelConfig) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ModelError::Api(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            client,
            session: RwLock::new(None),
        })
    }

    /// Probe the endpoint and establish a session.
    ///
    /// Any HTTP answer counts as reachable; only transport failures are
    /// errors. Callers at startup should log and continue on failure; the
    /// next operation retries via [`ensure_session`](Self::ensure_session).
    pub async fn connect(&self) -> Result<(), ModelError> {
        let url = format!("{}/config", self.config.endpoint.trim_end_matches('/'));
        self.client
            .get(&url)
            .timeout(Duration::from_secs(self.config.connect_timeout_secs))
            .send()
            .await
            .map_err(|e| ModelError::Unreachable(e.to_string()))?;

        let session_hash = uuid::Uuid::new_v4().simple().to_string();
        *self.session.write() = Some(ModelSession { session_hash });
        tracing::info!(endpoint = %self.config.endpoint, "connected to hosted interview model");
        Ok(())
    }

    async fn ensure_session(&self) -> Result<ModelSession, ModelError> {
        if let Some(session) = self.session.read().clone() {
            return Ok(session);
        }
        tracing::info!("no active model session, connecting");
        self.connect().await?;
        self.session
            .read()
            .clone()
            .ok_or_else(|| ModelError::Unreachable("session lost during connect".to_string()))
    }

    fn run_url(&self, op: &str) -> String {
        format!(
            "{}/run/{}",
            self.config.endpoint.trim_end_matches('/'),
            op.trim_start_matches('/')
        )
    }

    /// One remote operation: data in, first transcript string out.
    async fn call(&self, op: &str, data: Vec<Value>) -> Result<String, ModelError> {
        let session = self.ensure_session().await?;
        let request = PredictRequest {
            data,
            session_hash: session.session_hash,
        };

        let response = self
            .client
            .post(self.run_url(op))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // Transport failure: drop the session so the next call
                // reconnects instead of reusing a dead handle.
                *self.session.write() = None;
                if e.is_timeout() {
                    ModelError::Timeout
                } else {
                    ModelError::Unreachable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api(format!("{status}: {body}")));
        }

        let body: PredictResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;

        body.data
            .into_iter()
            .next()
            .and_then(|v| v.as_str().map(str::to_string))
            .ok_or_else(|| {
                ModelError::InvalidResponse("no transcript in response data".to_string())
            })
    }
}

#[async_trait]
impl InterviewModel for HostedInterviewModel {
    async fn begin_interview(
        &self,
        resume: &Path,
        job_description: &str,
    ) -> Result<String, ModelError> {
        let bytes = tokio::fs::read(resume).await?;
        let file_name = resume
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());
        let mime = if file_name.to_lowercase().ends_with(".pdf") {
            "application/pdf"
        } else {
            "application/octet-stream"
        };

        let resume_payload = json!({
            "name": file_name,
            "data": format!("data:{mime};base64,{}", BASE64.encode(&bytes)),
        });

        tracing::info!(
            resume = %file_name,
            resume_bytes = bytes.len(),
            "requesting interview start from hosted model"
        );
        self.call(
            &self.config.start_op,
            vec![resume_payload, json!(job_description)],
        )
        .await
    }

    async fn continue_interview(&self, utterance: &str) -> Result<String, ModelError> {
        tracing::info!(
            preview = %utterance.chars().take(80).collect::<String>(),
            "requesting next interviewer response"
        );
        self.call(&self.config.continue_op, vec![json!(utterance)])
            .await
    }

    fn is_connected(&self) -> bool {
        self.session.read().is_some()
    }
}

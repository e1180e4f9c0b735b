//! Hosted interview model interface

use crate::error::ModelError;
use async_trait::async_trait;
use std::path::Path;

/// Session-oriented client for the hosted interview model.
///
/// The remote API is stateless per call: the transcript and session context
/// travel in the request payload, never in client-local memory. That makes
/// one shared handle safe for concurrent requests, and implementations must
/// preserve this property.
#[async_trait]
pub trait InterviewModel: Send + Sync {
    /// Start an interview from a resume document and a job description.
    ///
    /// Returns the model's full conversation transcript; by convention the
    /// final line is the first question.
    async fn begin_interview(
        &self,
        resume: &Path,
        job_description: &str,
    ) -> Result<String, ModelError>;

    /// Submit the candidate's utterance and return the model's updated
    /// transcript text, which echoes the utterance before the new reply.
    async fn continue_interview(&self, utterance: &str) -> Result<String, ModelError>;

    /// Whether a remote session is currently established. Reported by the
    /// health endpoint; a `false` here never blocks a request, because
    /// operations re-establish the session lazily.
    fn is_connected(&self) -> bool;
}

//! Conversation and turn value types
//!
//! The conversation transcript is a single text blob round-tripped by the
//! caller on every request; the server stores nothing between turns. Turn
//! markers follow the hosted model's Markdown convention.

use serde::{Deserialize, Serialize};

/// Marker introducing a candidate turn in the transcript blob
pub const CANDIDATE_MARKER: &str = "**You:**";

/// Marker introducing an interviewer turn in the transcript blob
pub const INTERVIEWER_MARKER: &str = "**AI:**";

/// Opening question used when the model returns an empty transcript
pub const SEED_QUESTION: &str = "Tell me about yourself.";

/// Reply used when suffix extraction leaves nothing of the model's response
pub const ACKNOWLEDGMENT: &str = "Thank you for your response.";

/// Spoken when synthesis input is empty after stripping markup
pub const EMPTY_SPEECH_FALLBACK: &str = "I did not get a response. Please try again.";

/// Reference to a synthesized audio artifact on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpokenArtifact {
    /// File name inside the audio directory
    pub file_name: String,
    /// Public URL including a cache-busting query parameter
    pub url: String,
}

/// Result of starting an interview: the model's opening transcript plus the
/// synthesized first question.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewStart {
    pub conversation: String,
    pub first_question: String,
    pub audio: SpokenArtifact,
}

/// Result of one candidate/interviewer exchange. Ephemeral: built per
/// request and discarded once the response is sent.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewTurn {
    /// What the candidate was heard to say (or a placeholder on degraded
    /// transcription)
    pub transcription: String,
    /// The new portion of the interviewer's reply
    pub ai_response: String,
    /// The caller's history with this exchange appended
    pub conversation: String,
    pub audio: SpokenArtifact,
}

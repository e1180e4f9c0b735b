//! Core traits and types for the AI interviewer backend
//!
//! This crate provides the foundational pieces shared by all other crates:
//! - Trait seams for pluggable collaborators (STT, TTS, media conversion,
//!   the hosted interview model)
//! - Conversation and turn value types
//! - Error taxonomy

pub mod conversation;
pub mod error;
pub mod traits;

pub use conversation::{
    InterviewStart, InterviewTurn, SpokenArtifact, ACKNOWLEDGMENT, CANDIDATE_MARKER,
    EMPTY_SPEECH_FALLBACK, INTERVIEWER_MARKER, SEED_QUESTION,
};
pub use error::{
    ConversionError, Error, ModelError, Result, SynthesisError, TranscriptionError,
};
pub use traits::{InterviewModel, MediaConverter, SpeechToText, TextToSpeech};

//! Interview turn orchestration
//!
//! The closest thing this service has to a core: sequencing one interview
//! turn across the media converter, the transcription service, the hosted
//! model, and speech synthesis. Stateless between requests: the caller
//! round-trips the conversation transcript.

pub mod orchestrator;
pub mod transcript;

pub use orchestrator::TurnOrchestrator;

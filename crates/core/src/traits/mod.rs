//! Trait seams for pluggable collaborators
//!
//! Every remote or process-external dependency sits behind one of these
//! traits so the turn orchestrator can be exercised with in-memory fakes.

mod model;
mod speech;

pub use model::InterviewModel;
pub use speech::{MediaConverter, SpeechToText, TextToSpeech};

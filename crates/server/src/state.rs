//! Application state
//!
//! Shared state across all handlers. Everything here is either immutable
//! configuration or a concurrency-safe handle; the server keeps no
//! conversational state between requests.

use std::sync::Arc;

use ai_interviewer_agent::TurnOrchestrator;
use ai_interviewer_config::Settings;
use ai_interviewer_core::InterviewModel;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration snapshot loaded at startup
    pub settings: Arc<Settings>,
    /// The turn orchestrator (owns the adapter handles)
    pub orchestrator: Arc<TurnOrchestrator>,
    /// Model handle kept alongside the orchestrator so /health can report
    /// connection status without a remote call
    pub model: Arc<dyn InterviewModel>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        orchestrator: TurnOrchestrator,
        model: Arc<dyn InterviewModel>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            orchestrator: Arc::new(orchestrator),
            model,
        }
    }
}

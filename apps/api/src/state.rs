use std::sync::Arc;

use crate::config::Config;
use crate::evaluation::history::EvaluationHistory;
use crate::interview::engine::SessionRegistry;
use crate::interview::generator::InterviewModel;

/// Shared application state injected into all route handlers via Axum
/// extractors.
#[derive(Clone)]
pub struct AppState {
    /// The text-generation collaborator. Production: `LlmInterviewModel`
    /// over the Claude API; tests script their own.
    pub model: Arc<dyn InterviewModel>,
    /// Append-only evaluation history store.
    pub history: Arc<dyn EvaluationHistory>,
    /// Live in-memory sessions.
    pub sessions: SessionRegistry,
    pub config: Config,
}

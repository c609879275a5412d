use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no API key was configured; AI endpoints then answer with a configuration error.
    pub llm: Option<LlmClient>,
}

use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Hosted model backend. Default: `LlmClient`; tests inject a scripted generator.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
}

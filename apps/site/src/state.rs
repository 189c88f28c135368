use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::store::PostStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PostStore>,
    /// `None` when `OPENAI_API_KEY` is unset; metadata generation then answers 500.
    pub llm: Option<LlmClient>,
    pub config: Config,
}

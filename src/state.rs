use std::sync::Arc;

use crate::external::llm_provider::LlmProvider;
use crate::models::Dataset;
use crate::services::translation_service::FailOpenTranslator;

/// Process-wide dependencies, built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub llm: Arc<dyn LlmProvider>,
    pub translator: Arc<FailOpenTranslator>,
}

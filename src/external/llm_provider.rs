use async_trait::async_trait;

use crate::errors::LlmError;

/// Text completion collaborator.
///
/// One call per user query. Implementations must not retry and must not
/// impose their own deadline; failures are surfaced to the caller as-is.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for a single prompt
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

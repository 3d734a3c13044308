use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::LlmConfig;
use crate::errors::LlmError;
use crate::external::llm_provider::LlmProvider;

/// Chat-completions request/response structures shared by OpenAI-compatible gateways
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
    // Some gateways report failures inside a 200 body
    error: Option<ChatErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatErrorBody {
    message: String,
}

/// LLM provider speaking the OpenAI chat-completions protocol
/// (OpenAI, OpenRouter and similar gateways).
pub struct OpenAiCompatibleProvider {
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
    client: Client,
}

impl OpenAiCompatibleProvider {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            temperature: config.temperature,
            // No client-side timeout: a stalled provider stalls only its own request.
            client: Client::new(),
        }
    }

    async fn call_chat_completions(&self, request: &ChatRequest<'_>) -> Result<ChatResponse, LlmError> {
        let response = self.client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError(e.to_string()))?;

        let status = response.status();

        if status == 429 {
            return Err(LlmError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::ApiError(format!("HTTP {}: {}", status, error_text)));
        }

        response.json::<ChatResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        info!("Requesting LLM completion (model: {}, prompt: {} chars)", self.model, prompt.len());

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            temperature: self.temperature,
        };

        let response = self.call_chat_completions(&request).await?;

        if let Some(error) = response.error {
            return Err(LlmError::ApiError(error.message));
        }

        let content = response.choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("No choices in response".to_string()))?
            .message
            .content
            .unwrap_or_default();

        if content.trim().is_empty() {
            warn!("LLM returned a blank completion");
        }

        if let Some(usage) = response.usage {
            debug!("LLM tokens: {} prompt + {} completion = {} total",
                   usage.prompt_tokens, usage.completion_tokens, usage.total_tokens);
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> OpenAiCompatibleProvider {
        OpenAiCompatibleProvider::new(&LlmConfig {
            api_key: "test-key".to_string(),
            base_url: format!("{}/api/v1/", server.uri()),
            ..LlmConfig::default()
        })
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "messages": [{"role": "user", "content": "How many sessions?"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "Final Answer: 42"}}],
                "usage": {"prompt_tokens": 10, "completion_tokens": 3, "total_tokens": 13}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let completion = provider_for(&server).complete("How many sessions?").await.unwrap();
        assert_eq!(completion, "Final Answer: 42");
    }

    #[tokio::test]
    async fn test_complete_maps_rate_limit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&server)
            .await;

        let result = provider_for(&server).complete("prompt").await;
        assert!(matches!(result, Err(LlmError::RateLimited)));
    }

    #[tokio::test]
    async fn test_complete_reports_http_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let err = provider_for(&server).complete("prompt").await.unwrap_err();
        assert!(matches!(err, LlmError::ApiError(ref msg) if msg.contains("invalid api key")));
    }

    #[tokio::test]
    async fn test_complete_reports_error_inside_ok_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": {"message": "model is overloaded", "code": 502}
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server).complete("prompt").await.unwrap_err();
        assert!(matches!(err, LlmError::ApiError(ref msg) if msg == "model is overloaded"));
    }

    #[tokio::test]
    async fn test_complete_passes_blank_and_null_content_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "   "}}]
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": null}}]
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        assert_eq!(provider.complete("prompt").await.unwrap(), "   ");
        assert_eq!(provider.complete("prompt").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_complete_requires_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let result = provider_for(&server).complete("prompt").await;
        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
    }
}

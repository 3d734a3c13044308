use async_trait::async_trait;
use serde_json::Value;

use crate::external::translation_provider::{TranslationError, TranslationProvider};
use crate::models::LanguageCode;

/// Google Translate's keyless web endpoint (`translate_a/single`, client `gtx`).
pub struct GoogleTranslateProvider {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslateProvider {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

// Response shape: [[["<translated>", "<source>", ...], ...], null, "<detected lang>", ...]
fn join_segments(body: &Value) -> Result<String, TranslationError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::Parse("missing sentence list".into()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(TranslationError::EmptyResult);
    }
    Ok(translated)
}

#[async_trait]
impl TranslationProvider for GoogleTranslateProvider {
    async fn translate(
        &self,
        text: &str,
        target: &LanguageCode,
    ) -> Result<String, TranslationError> {
        let url = format!("{}/translate_a/single", self.base_url);

        let resp = self
            .client
            .get(url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| TranslationError::Network(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::BAD_REQUEST {
            return Err(TranslationError::UnsupportedLanguage(target.to_string()));
        }
        if !status.is_success() {
            return Err(TranslationError::BadResponse(format!("HTTP {}", status)));
        }

        let body = resp
            .json::<Value>()
            .await
            .map_err(|e| TranslationError::Parse(e.to_string()))?;

        join_segments(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_join_segments_concatenates_sentences() {
        let body = json!([[["Xin chào. ", "Hello. ", null, null, 1], ["Bạn khỏe không?", "How are you?", null, null, 1]], null, "en"]);
        assert_eq!(join_segments(&body).unwrap(), "Xin chào. Bạn khỏe không?");
    }

    #[test]
    fn test_join_segments_rejects_empty_translation() {
        let body = json!([[], null, "en"]);
        assert!(matches!(join_segments(&body), Err(TranslationError::EmptyResult)));
        assert!(matches!(join_segments(&json!({})), Err(TranslationError::Parse(_))));
    }

    #[tokio::test]
    async fn test_translate_sends_target_language() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("tl", "th"))
            .and(query_param("q", "Sessions rose."))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([[["เซสชันเพิ่มขึ้น", "Sessions rose.", null, null, 1]], null, "en"])))
            .expect(1)
            .mount(&server)
            .await;

        let provider = GoogleTranslateProvider::new(&server.uri());
        let translated = provider.translate("Sessions rose.", &LanguageCode::new("th")).await.unwrap();
        assert_eq!(translated, "เซสชันเพิ่มขึ้น");
    }

    #[tokio::test]
    async fn test_translate_maps_bad_request_to_unsupported_language() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let provider = GoogleTranslateProvider::new(&server.uri());
        let result = provider.translate("hello", &LanguageCode::new("xx")).await;
        assert!(matches!(result, Err(TranslationError::UnsupportedLanguage(code)) if code == "xx"));
    }
}

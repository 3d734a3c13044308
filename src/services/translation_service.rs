use std::sync::Arc;

use tracing::{debug, warn};

use crate::external::translation_provider::TranslationProvider;
use crate::models::LanguageCode;

/// Fail-open wrapper around a translation provider.
///
/// Never returns an error: when the provider fails or yields nothing, the
/// input text is handed back untranslated.
pub struct FailOpenTranslator {
    provider: Arc<dyn TranslationProvider>,
}

impl FailOpenTranslator {
    pub fn new(provider: Arc<dyn TranslationProvider>) -> Self {
        Self { provider }
    }

    /// Translate `text` into `target`. English targets are returned as-is.
    pub async fn translate(&self, text: &str, target: &LanguageCode) -> String {
        if target.is_english() {
            return text.to_string();
        }
        self.translate_or_passthrough(text, target).await
    }

    /// Bring user input written in `source` into English.
    pub async fn to_english(&self, text: &str, source: &LanguageCode) -> String {
        if source.is_english() {
            return text.to_string();
        }
        self.translate_or_passthrough(text, &LanguageCode::english()).await
    }

    async fn translate_or_passthrough(&self, text: &str, target: &LanguageCode) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        match self.provider.translate(text, target).await {
            Ok(translated) if !translated.trim().is_empty() => {
                debug!("Translated {} chars into {}", text.len(), target);
                translated
            }
            Ok(_) => {
                warn!("Translation into {} came back empty, keeping original text", target);
                text.to_string()
            }
            Err(e) => {
                warn!("Translation into {} failed, keeping original text: {}", target, e);
                text.to_string()
            }
        }
    }
}

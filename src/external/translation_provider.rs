use async_trait::async_trait;
use thiserror::Error;

use crate::models::LanguageCode;

#[derive(Debug, Clone, Error)]
pub enum TranslationError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("empty translation")]
    EmptyResult,
}

/// Raw machine-translation collaborator. The source language is auto-detected.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        target: &LanguageCode,
    ) -> Result<String, TranslationError>;
}

//! Fakes for the external collaborators, shared by unit and router tests.
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::LlmError;
use crate::external::llm_provider::LlmProvider;
use crate::external::translation_provider::{TranslationError, TranslationProvider};
use crate::models::{Dataset, LanguageCode};
use crate::services::dataset_service::{generate_mock_dataset, mock_start_date, MOCK_DAYS, MOCK_SEED};

/// The same 365-day dataset the server generates in mock mode
pub fn mock_dataset() -> Dataset {
    generate_mock_dataset(MOCK_SEED, mock_start_date(), MOCK_DAYS)
}

pub fn sample_dataset(days: u32) -> Dataset {
    generate_mock_dataset(MOCK_SEED, mock_start_date(), days)
}

/// LLM returning a fixed reply (or error) and recording every prompt.
pub struct ScriptedLlm {
    reply: Result<String, LlmError>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn reply(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn fail(error: LlmError) -> Self {
        Self {
            reply: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}

pub struct PanickingLlm;

#[async_trait]
impl LlmProvider for PanickingLlm {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
        panic!("completion client poisoned")
    }
}

/// Translator that prefixes text and records the requested targets.
pub struct RecordingTranslator {
    prefix: Option<String>,
    targets: Mutex<Vec<LanguageCode>>,
}

impl RecordingTranslator {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: Some(prefix.to_string()),
            targets: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with an empty string
    pub fn blank() -> Self {
        Self {
            prefix: None,
            targets: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.targets.lock().unwrap().len()
    }

    pub fn targets(&self) -> Vec<LanguageCode> {
        self.targets.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationProvider for RecordingTranslator {
    async fn translate(&self, text: &str, target: &LanguageCode) -> Result<String, TranslationError> {
        self.targets.lock().unwrap().push(target.clone());
        Ok(match &self.prefix {
            Some(prefix) => format!("{} {}", prefix, text),
            None => String::new(),
        })
    }
}

pub struct FailingTranslator {
    error: TranslationError,
}

impl FailingTranslator {
    pub fn new(error: TranslationError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl TranslationProvider for FailingTranslator {
    async fn translate(&self, _text: &str, _target: &LanguageCode) -> Result<String, TranslationError> {
        Err(self.error.clone())
    }
}

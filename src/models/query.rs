use serde::{Deserialize, Serialize};

use crate::models::ChartSpec;

/// Two-letter language code, stored lower-cased. `"en"` means no translation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    pub const ENGLISH: &'static str = "en";

    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_lowercase())
    }

    pub fn english() -> Self {
        Self(Self::ENGLISH.to_string())
    }

    pub fn is_english(&self) -> bool {
        self.0 == Self::ENGLISH
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for LanguageCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<LanguageCode> for String {
    fn from(value: LanguageCode) -> Self {
        value.0
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /query`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub language: LanguageCode,
}

/// Successful answer to a query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Answer text in the requested language
    pub response: String,
    /// Trend chart, present only for trend questions
    pub chart: Option<ChartSpec>,
    /// Suggested next question in the requested language
    pub follow_up: String,
}

/// Answer and follow-up extracted from a raw completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAnswer {
    pub answer: String,
    pub follow_up: String,
}

impl ParsedAnswer {
    pub fn new(answer: impl Into<String>, follow_up: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            follow_up: follow_up.into(),
        }
    }
}

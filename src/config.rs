use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuration for the LLM completion endpoint
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://openrouter.ai/api/v1".to_string(),
            model: "meta-llama/llama-3.1-8b-instruct:free".to_string(),
            temperature: 0.7,
        }
    }
}

/// Where the analytics table comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// Synthetic data; generated into `path` when the file does not exist yet
    Mock { path: PathBuf },
    /// Exported analytics CSV that must already exist
    Live { path: PathBuf },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub translate_base_url: String,
    pub data_source: DataSource,
    pub cors_origin: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// Read once at startup; never consulted again per request.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let defaults = LlmConfig::default();

        let api_key = lookup("OPENAI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;

        let temperature_raw = var_or("LLM_TEMPERATURE", &defaults.temperature.to_string());
        let temperature = temperature_raw.parse::<f32>().map_err(|e| ConfigError::Invalid {
            var: "LLM_TEMPERATURE",
            value: temperature_raw.clone(),
            reason: e.to_string(),
        })?;

        let use_mock = var_or("USE_MOCK_DATA", "true").to_lowercase() == "true";
        let data_source = if use_mock {
            DataSource::Mock {
                path: PathBuf::from(var_or("MOCK_DATA_PATH", "mock_ga_data.csv")),
            }
        } else {
            let path = lookup("ANALYTICS_DATA_PATH")
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing("ANALYTICS_DATA_PATH"))?;
            DataSource::Live { path: PathBuf::from(path) }
        };

        let port_raw = var_or("SERVER_PORT", "8000");
        let port = port_raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
            var: "SERVER_PORT",
            value: port_raw.clone(),
            reason: e.to_string(),
        })?;

        let config = Self {
            llm: LlmConfig {
                api_key,
                base_url: var_or("OPENAI_BASE_URL", &defaults.base_url),
                model: var_or("LLM_MODEL", &defaults.model),
                temperature,
            },
            translate_base_url: var_or("TRANSLATE_BASE_URL", "https://translate.googleapis.com"),
            data_source,
            cors_origin: var_or("CORS_ALLOWED_ORIGIN", "http://localhost:3000"),
            host: var_or("SERVER_HOST", "0.0.0.0"),
            port,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cors_origin_header()?;
        self.bind_addr()?;
        url::Url::parse(&self.llm.base_url).map_err(|e| ConfigError::Invalid {
            var: "OPENAI_BASE_URL",
            value: self.llm.base_url.clone(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    pub fn cors_origin_header(&self) -> Result<HeaderValue, ConfigError> {
        HeaderValue::from_str(&self.cors_origin).map_err(|e| ConfigError::Invalid {
            var: "CORS_ALLOWED_ORIGIN",
            value: self.cors_origin.clone(),
            reason: e.to_string(),
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                var: "SERVER_HOST",
                value: self.host.clone(),
                reason: e.to_string(),
            })
    }
}

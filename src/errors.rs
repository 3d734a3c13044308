use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures from the LLM completion collaborator.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    #[error("LLM network error: {0}")]
    NetworkError(String),
    #[error("LLM provider rate limited the request")]
    RateLimited,
    #[error("LLM API error: {0}")]
    ApiError(String),
    #[error("Invalid LLM response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Llm(#[from] LlmError),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Uniform error payload returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn internal(description: impl std::fmt::Display) -> Self {
        Self {
            detail: format!("Internal Server Error: {}", description),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Llm(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = match &self {
            AppError::InvalidRequest(msg) => ErrorBody { detail: msg.clone() },
            AppError::Llm(_) => ErrorBody::internal(&self),
        };
        (status, Json(body)).into_response()
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(value: axum::extract::rejection::JsonRejection) -> Self {
        AppError::InvalidRequest(value.body_text())
    }
}

//! Error handling for the FarmMind backend
//!
//! Client-facing errors are rendered as a consistent JSON envelope. Failures
//! of the local LLM service are a separate type: they only ever move a
//! fallback chain on to its next tier and are never returned to callers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),
}

impl AppError {
    /// Validation failure on a named request field
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::InvalidUpload(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_UPLOAD".to_string(),
                    message: msg.clone(),
                    field: Some("file".to_string()),
                },
            ),
        };

        tracing::warn!("Rejected request: {}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

/// Failure talking to the local LLM service
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("LLM service unreachable: {0}")]
    Unreachable(String),

    #[error("LLM request timed out")]
    Timeout,

    #[error("Model '{0}' not found on the LLM service")]
    ModelNotFound(String),

    #[error("LLM service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unusable LLM response: {0}")]
    MalformedResponse(String),

    #[error("LLM worker pool unavailable")]
    PoolClosed,
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else if e.is_decode() {
            UpstreamError::MalformedResponse(e.to_string())
        } else {
            UpstreamError::Unreachable(e.to_string())
        }
    }
}

/// Result type alias for LLM calls
pub type UpstreamResult<T> = Result<T, UpstreamError>;

//! Error handling module
//!
//! Defines the error taxonomy, the wire-level error envelope and the
//! application error type returned by handlers

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Request validation failed (malformed or semantically invalid body)
    #[error("{0}")]
    Validation(String),

    /// Caller credential problem (reserved, not emitted by the chat flow)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit exceeded (reserved, surfaced through UI classification)
    #[error("Rate limit exceeded, please try again later")]
    RateLimit,

    /// Provider configuration fault, e.g. missing credential
    #[error("{0}")]
    ProviderInit(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal server error
    #[error("{0}")]
    Internal(String),
}

/// Error taxonomy used in the wire envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    #[serde(rename = "validation_error")]
    Validation,
    #[serde(rename = "authentication_error")]
    Authentication,
    #[serde(rename = "rate_limit_error")]
    RateLimit,
    #[serde(rename = "api_error")]
    Api,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation_error",
            ErrorKind::Authentication => "authentication_error",
            ErrorKind::RateLimit => "rate_limit_error",
            ErrorKind::Api => "api_error",
        }
    }
}

/// Wire-level error envelope returned by the chat endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

/// Inner error object, all fields always present
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub message: String,
    pub code: String,
}

/// Build an error envelope. Pure construction, no validation of inputs.
pub fn error_envelope(
    kind: ErrorKind,
    message: impl Into<String>,
    code: impl Into<String>,
) -> ErrorEnvelope {
    ErrorEnvelope {
        error: ErrorBody {
            kind,
            message: message.into(),
            code: code.into(),
        },
    }
}

/// Structurally verify that a value matches the error envelope shape.
///
/// Used defensively when deserializing error payloads from elsewhere:
/// non-null object, nested `error` object, three string leaves.
pub fn is_error_envelope(value: &Value) -> bool {
    let Some(error) = value.as_object().and_then(|obj| obj.get("error")) else {
        return false;
    };

    let Some(detail) = error.as_object() else {
        return false;
    };

    detail.get("type").map_or(false, Value::is_string)
        && detail.get("message").map_or(false, Value::is_string)
        && detail.get("code").map_or(false, Value::is_string)
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::RateLimit => StatusCode::TOO_MANY_REQUESTS,
            AppError::ProviderInit(_)
            | AppError::Serialization(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get taxonomy kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Authentication(_) => ErrorKind::Authentication,
            AppError::RateLimit => ErrorKind::RateLimit,
            AppError::ProviderInit(_)
            | AppError::Serialization(_)
            | AppError::Internal(_) => ErrorKind::Api,
        }
    }

    /// Get stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "INVALID_REQUEST_BODY",
            AppError::Authentication(_) => "AUTHENTICATION_ERROR",
            AppError::RateLimit => "RATE_LIMITED",
            AppError::ProviderInit(_) => "OPENROUTER_INIT_ERROR",
            AppError::Serialization(_) | AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to the wire envelope
    pub fn to_envelope(&self) -> ErrorEnvelope {
        error_envelope(self.kind(), self.to_string(), self.code())
    }
}

/// Allows handler errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Chat API error: {} - Status code: {}", self, status);
        } else {
            tracing::warn!("Client error: {} - Status code: {}", self.kind().as_str(), status);
        }

        (status, Json(self.to_envelope())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Client-side API errors.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Unable to connect to the server: {0}")]
    Network(String),

    #[error("Request timeout. Please check your connection and try again.")]
    Timeout,

    #[error("{message}")]
    Server {
        code: String,
        message: String,
        status_code: Option<u16>,
        details: Option<serde_json::Value>,
    },

    #[error("Request cancelled")]
    Cancelled,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl ApiError {
    pub fn server(code: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Server {
            code: code.into(),
            message: message.into(),
            status_code: None,
            details: None,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &str {
        match self {
            ApiError::Network(_) => "NETWORK_ERROR",
            ApiError::Timeout => "TIMEOUT",
            ApiError::Server { code, .. } => code,
            ApiError::Cancelled => "CANCELLED",
            ApiError::MalformedResponse(_) => "MALFORMED_RESPONSE",
        }
    }

    /// HTTP status, when the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Server { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Whether the viewer should be told about this error.
    pub fn is_silent(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}

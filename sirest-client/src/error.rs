//! Client error types

use shared::error::{AppError, ErrorCode};
use shared::order::TransitionError;
use shared::response::EnvelopeError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection refused, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response. `message` is the body's `error`/`message` field, or
    /// the status text when the body is not JSON.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// 409: the resource changed since it was read
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 401: missing, invalid or expired token
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// 2xx with a body of the wrong shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rejected locally before any request was sent
    #[error("Validation error: {0}")]
    Validation(#[from] AppError),

    /// Refused by the order lifecycle gate
    #[error("Transition refused: {0}")]
    Transition(#[from] TransitionError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Error code for display and logging
    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::Http(_) => ErrorCode::NetworkError,
            ClientError::Api { status, .. } => http_code(*status),
            ClientError::Conflict(_) => ErrorCode::VersionConflict,
            ClientError::Unauthorized(_) => ErrorCode::NotAuthenticated,
            ClientError::InvalidResponse(_) | ClientError::Serialization(_) => {
                ErrorCode::InternalError
            }
            ClientError::Validation(e) => e.code,
            ClientError::Transition(e) => e.code(),
        }
    }

    /// Never reached the backend
    pub fn is_local(&self) -> bool {
        matches!(self, ClientError::Validation(_) | ClientError::Transition(_))
    }
}

fn http_code(status: u16) -> ErrorCode {
    reqwest::StatusCode::from_u16(status)
        .map(ErrorCode::from_http_status)
        .unwrap_or(ErrorCode::Unknown)
}

impl From<EnvelopeError> for ClientError {
    fn from(err: EnvelopeError) -> Self {
        ClientError::InvalidResponse(err.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

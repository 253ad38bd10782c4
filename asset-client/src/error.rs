//! Client error types

use shared::{ErrorCode, ValidationError};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Missing or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Identification failed or nobody is identified
    #[error("Authentication required: {}", .0.message())]
    Unauthorized(ErrorCode),

    /// Actor's role does not allow the action
    #[error("Permission denied: {}", .0.message())]
    Forbidden(ErrorCode),

    /// A pre-write guard rejected the action
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Confirmation was declined
    #[error("Cancelled: {0}")]
    Cancelled(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Http(_) => ErrorCode::NetworkError,
            Self::Status { .. } | Self::InvalidResponse(_) => ErrorCode::RemoteError,
            Self::Unauthorized(code) | Self::Forbidden(code) => *code,
            Self::Validation(e) => e.code(),
            Self::Cancelled(_) => ErrorCode::NotConfirmed,
            Self::Config(_) | Self::Serialization(_) => ErrorCode::Unknown,
        }
    }

    /// Whether the failure happened on the wire rather than locally
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status { .. } | Self::InvalidResponse(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

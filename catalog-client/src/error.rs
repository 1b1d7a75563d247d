//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a structured error body
    #[error("API error {}: {message}", code.map(|c| c.to_string()).unwrap_or_else(|| "-".into()))]
    Api { code: Option<u16>, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Server-side error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let message = err.to_string();
        match err {
            ClientError::Http(_) => AppError::network(message),
            ClientError::Api { code, message } => {
                let code = code
                    .and_then(|c| ErrorCode::try_from(c).ok())
                    .filter(|c| !c.is_success())
                    .unwrap_or(ErrorCode::RemoteRejected);
                AppError::with_message(code, message)
            }
            ClientError::NotFound(_) => AppError::with_message(ErrorCode::NotFound, message),
            ClientError::Validation(_) => {
                AppError::with_message(ErrorCode::ValidationFailed, message)
            }
            ClientError::Unauthorized | ClientError::Internal(_) => {
                AppError::with_message(ErrorCode::RemoteRejected, message)
            }
            ClientError::InvalidResponse(_) | ClientError::Serialization(_) => {
                AppError::internal(message)
            }
        }
    }
}

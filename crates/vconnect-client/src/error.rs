//! Error types for REST client operations

use thiserror::Error;
use vconnect_core::ServiceError;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Server returned an error response
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Timeout
    #[error("Request timed out")]
    Timeout,
}

impl ClientError {
    /// Create a server error from status code and message
    pub fn server_error(status: u16, message: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            message: message.into(),
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::ServerError { status, .. } => Some(*status),
            ClientError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<ClientError> for ServiceError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::ServerError { status, message } => ServiceError::status(status, message),
            ClientError::HttpError(e) => {
                if let Some(status) = e.status() {
                    ServiceError::status(status.as_u16(), e.to_string())
                } else if e.is_decode() {
                    ServiceError::InvalidResponse(e.to_string())
                } else if e.is_builder() {
                    ServiceError::InvalidRequest(e.to_string())
                } else {
                    ServiceError::Transport(e.to_string())
                }
            }
            ClientError::InvalidUrl(e) => ServiceError::InvalidRequest(e.to_string()),
            ClientError::IoError(e) => ServiceError::Transport(e.to_string()),
            ClientError::ParseError(msg) => ServiceError::InvalidResponse(msg),
            ClientError::Timeout => ServiceError::Transport("request timed out".into()),
        }
    }
}

//! Common error types for remote vehicle services

use thiserror::Error;

/// Result type for remote service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors returned by an [`Authenticator`](crate::Authenticator) or
/// [`VehicleService`](crate::VehicleService) implementation
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// The remote service answered with a non-success status
    #[error("Service error {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never produced a response (connect, timeout, I/O)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response arrived but could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The request could not be built (bad identifier, bad URL)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// How the orchestrator should treat a failed remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 401 - credentials expired, re-authentication may help
    Unauthorized,
    /// 403 / 502 - the vehicle does not support the requested service
    Unsupported,
    /// No response from the remote side
    Transport,
    /// Anything else
    Other,
}

impl ServiceError {
    /// Create a status error from a status code and message
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Returns the status code carried by this error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ServiceError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Classify this error for retry/exclusion decisions
    pub fn kind(&self) -> FailureKind {
        match self {
            ServiceError::Status { status: 401, .. } => FailureKind::Unauthorized,
            ServiceError::Status {
                status: 403 | 502, ..
            } => FailureKind::Unsupported,
            ServiceError::Status { .. } => FailureKind::Other,
            ServiceError::Transport(_) => FailureKind::Transport,
            ServiceError::InvalidResponse(_) | ServiceError::InvalidRequest(_) => {
                FailureKind::Other
            }
        }
    }

    /// Whether this error means the remote side was never reached
    pub fn is_transport(&self) -> bool {
        matches!(self, ServiceError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(
            ServiceError::status(401, "expired").kind(),
            FailureKind::Unauthorized
        );
        assert_eq!(
            ServiceError::status(403, "forbidden").kind(),
            FailureKind::Unsupported
        );
        assert_eq!(
            ServiceError::status(502, "bad gateway").kind(),
            FailureKind::Unsupported
        );
        assert_eq!(
            ServiceError::status(500, "boom").kind(),
            FailureKind::Other
        );
        assert_eq!(
            ServiceError::transport("connection reset").kind(),
            FailureKind::Transport
        );
        assert_eq!(
            ServiceError::InvalidResponse("not json".into()).kind(),
            FailureKind::Other
        );
    }

    #[test]
    fn test_status_code() {
        assert_eq!(ServiceError::status(404, "missing").status_code(), Some(404));
        assert_eq!(ServiceError::transport("down").status_code(), None);
    }

    #[test]
    fn test_display() {
        let err = ServiceError::status(403, "Refresh not supported");
        assert_eq!(err.to_string(), "Service error 403: Refresh not supported");
    }
}

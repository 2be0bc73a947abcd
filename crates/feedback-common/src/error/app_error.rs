//! Application error types
//!
//! Boundary error handed to whatever transport sits in front of the engine.
//! Maps domain failures to HTTP-style status codes and stable error codes.

use feedback_core::FeedbackError;
use serde::Serialize;
use std::fmt;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Already answered by the transport layer (e.g. an authorization failure);
    // carries the status it chose so it is passed through untouched
    #[error("Handled upstream with status {0}")]
    HandledUpstream(u16),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] FeedbackError),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::HandledUpstream(status) => *status,
            Self::Internal(_) => 500,
            Self::Domain(e) => {
                if e.is_validation() {
                    400
                } else if e.is_conflict() {
                    409
                } else {
                    500
                }
            }
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::HandledUpstream(_) => "HANDLED_UPSTREAM",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Whether the transport already produced the response for this failure
    #[must_use]
    pub fn is_handled_upstream(&self) -> bool {
        matches!(self, Self::HandledUpstream(_))
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code())
    }

    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Error response structure for API responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.to_string(),
            details: None,
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use feedback_core::Snowflake;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::validation("bad window").status_code(), 400);
        assert_eq!(AppError::HandledUpstream(401).status_code(), 401);
        assert_eq!(AppError::internal(anyhow::anyhow!("boom")).status_code(), 500);
    }

    #[test]
    fn test_domain_error_mapping() {
        let err = AppError::from(FeedbackError::InvalidReactionKind("meh".into()));
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_REACTION_KIND");

        let err = AppError::from(FeedbackError::DuplicateEvent(Snowflake::new(3)));
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "DUPLICATE_EVENT");
    }

    #[test]
    fn test_client_and_server_errors() {
        assert!(AppError::from(FeedbackError::InvalidTimestamp(-1.0)).is_client_error());
        assert!(AppError::internal(anyhow::anyhow!("boom")).is_server_error());
        assert!(AppError::HandledUpstream(403).is_handled_upstream());
    }

    #[test]
    fn test_error_response() {
        let err = AppError::from(FeedbackError::InvalidTimestamp(-2.0));
        let response = ErrorResponse::from(&err);

        assert_eq!(response.code, "INVALID_TIMESTAMP");
        assert_eq!(
            response.message,
            "Invalid timeline position: -2 (must be finite and >= 0)"
        );
        assert!(response.details.is_none());
    }
}

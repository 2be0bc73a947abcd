//! Feedback errors - local validation failures reported by the engine
//!
//! Every variant is a caller-correctable input error. An operation that
//! returns one of these has not mutated any state.

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedbackError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Unsupported reaction kind: {0}")]
    InvalidReactionKind(String),

    #[error("Invalid timeline position: {0} (must be finite and >= 0)")]
    InvalidTimestamp(f64),

    #[error("Invalid feedback window: {0} (must be finite and > 0)")]
    InvalidWindow(f64),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Feedback event already ingested: {0}")]
    DuplicateEvent(Snowflake),
}

impl FeedbackError {
    /// Stable error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidReactionKind(_) => "INVALID_REACTION_KIND",
            Self::InvalidTimestamp(_) => "INVALID_TIMESTAMP",
            Self::InvalidWindow(_) => "INVALID_WINDOW",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::DuplicateEvent(_) => "DUPLICATE_EVENT",
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidReactionKind(_)
                | Self::InvalidTimestamp(_)
                | Self::InvalidWindow(_)
                | Self::ValidationError(_)
                | Self::ContentTooLong { .. }
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DuplicateEvent(_))
    }
}

/// Result type for domain operations
pub type FeedbackResult<T> = Result<T, FeedbackError>;

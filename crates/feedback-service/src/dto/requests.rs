//! Request DTOs for feedback endpoints
//!
//! Request DTOs implement `Deserialize`, and `Validate` where a field carries
//! a shape rule. Timeline positions and windows are left to the domain value
//! objects so they always fail as `INVALID_TIMESTAMP` / `INVALID_WINDOW`.
//! Snowflake fields travel as strings on the wire.

use feedback_core::Snowflake;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Reaction Requests
// ============================================================================

/// Toggle a reaction on or off at a timeline position
///
/// The reaction kind comes from the path, not the body.
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleReactionRequest {
    pub author_id: Snowflake,

    /// Seconds from the start of the target's timeline
    pub position: f64,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Post a comment anchored at a timeline position
///
/// The upper length bound is the configured `FEEDBACK_MAX_COMMENT_LENGTH`,
/// enforced by the engine.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    pub author_id: Snowflake,

    #[validate(length(min = 1, message = "Comment must not be empty"))]
    pub body: String,

    pub position: f64,
}

// ============================================================================
// Timeline Queries
// ============================================================================

/// Query for the feedback around one position
#[derive(Debug, Clone, Deserialize)]
pub struct GroupAroundQuery {
    pub position: f64,

    /// Window radius in seconds (defaults to the configured window)
    pub window: Option<f64>,

    /// Viewer used to fill in `me` on reaction counts
    pub viewer_id: Option<Snowflake>,
}

/// Query for the peak groups of a whole target
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeaksQuery {
    /// Window radius in seconds (defaults to the configured window)
    pub window: Option<f64>,

    pub viewer_id: Option<Snowflake>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_reaction_deserialize() {
        let request: ToggleReactionRequest =
            serde_json::from_str(r#"{"author_id":"42","position":12.5}"#).unwrap();
        assert_eq!(request.author_id, Snowflake::new(42));
        assert_eq!(request.position, 12.5);
    }

    #[test]
    fn test_create_comment_validation() {
        let valid = CreateCommentRequest {
            author_id: Snowflake::new(1),
            body: "Great demo".to_string(),
            position: 3.0,
        };
        assert!(valid.validate().is_ok());

        let empty = CreateCommentRequest {
            body: String::new(),
            ..valid.clone()
        };
        assert!(empty.validate().is_err());

        // Length cap belongs to configuration, not the DTO
        let long = CreateCommentRequest {
            body: "a".repeat(3000),
            ..valid
        };
        assert!(long.validate().is_ok());
    }

    #[test]
    fn test_queries_default_window() {
        let query: GroupAroundQuery = serde_json::from_str(r#"{"position":10}"#).unwrap();
        assert!(query.window.is_none());
        assert!(query.viewer_id.is_none());

        let peaks: PeaksQuery = serde_json::from_str(r#"{"window":2.5,"viewer_id":"7"}"#).unwrap();
        assert_eq!(peaks.window, Some(2.5));
        assert_eq!(peaks.viewer_id, Some(Snowflake::new(7)));
    }
}

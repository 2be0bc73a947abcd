//! Response DTOs for feedback endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Snowflakes are
//! rendered as strings.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// Event Responses
// ============================================================================

/// One feedback event
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackEventResponse {
    pub id: String,
    pub target_id: String,
    pub author_id: String,
    /// Seconds from the start of the target's timeline
    pub position: f64,
    /// `"reaction"` or `"comment"`
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Comment response
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub target_id: String,
    pub author_id: String,
    pub body: String,
    pub position: f64,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// Reaction count for display
#[derive(Debug, Clone, Serialize)]
pub struct ReactionResponse {
    pub reaction_type: String,
    pub count: usize,
    pub me: bool,
}

/// One currently active reaction on a target
#[derive(Debug, Clone, Serialize)]
pub struct ActiveReactionResponse {
    pub author_id: String,
    pub reaction_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
}

/// Result of a toggle
#[derive(Debug, Clone, Serialize)]
pub struct ToggleReactionResponse {
    /// State of the toggled key after the call
    pub active: bool,
    pub event: FeedbackEventResponse,
    /// Counts over every active reaction on the target
    pub reactions: Vec<ReactionResponse>,
    pub active_reactions: Vec<ActiveReactionResponse>,
}

// ============================================================================
// Timeline Responses
// ============================================================================

/// One cluster of feedback on the timeline
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackGroupResponse {
    pub target_id: String,
    pub center: f64,
    pub start: f64,
    pub end: f64,
    /// Visible reactions and all comments, in timeline order
    pub events: Vec<FeedbackEventResponse>,
    pub reactions: Vec<ReactionResponse>,
    pub comment_count: usize,
}

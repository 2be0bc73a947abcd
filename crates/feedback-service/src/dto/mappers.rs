//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use feedback_core::{FeedbackEvent, FeedbackGroup, FeedbackKind, ReactionCount, ReactionState};

use super::responses::{
    ActiveReactionResponse, CommentResponse, FeedbackEventResponse, FeedbackGroupResponse,
    ReactionResponse,
};

// ============================================================================
// Event Mappers
// ============================================================================

impl From<&FeedbackEvent> for FeedbackEventResponse {
    fn from(event: &FeedbackEvent) -> Self {
        let (kind, reaction_type, active, body) = match &event.kind {
            FeedbackKind::Reaction {
                reaction_type,
                active,
                ..
            } => ("reaction", Some(reaction_type.to_string()), Some(*active), None),
            FeedbackKind::Comment { body, .. } => ("comment", None, None, Some(body.clone())),
        };

        Self {
            id: event.id.to_string(),
            target_id: event.target_id.to_string(),
            author_id: event.author_id().to_string(),
            position: event.timestamp.seconds(),
            kind,
            reaction_type,
            active,
            body,
            recorded_at: event.recorded_at,
        }
    }
}

impl From<FeedbackEvent> for FeedbackEventResponse {
    fn from(event: FeedbackEvent) -> Self {
        Self::from(&event)
    }
}

impl CommentResponse {
    /// Comment view of an event; `None` for reaction events
    pub fn from_event(event: &FeedbackEvent) -> Option<Self> {
        let body = event.comment_body()?;
        Some(Self {
            id: event.id.to_string(),
            target_id: event.target_id.to_string(),
            author_id: event.author_id().to_string(),
            body: body.to_string(),
            position: event.timestamp.seconds(),
            created_at: event.recorded_at,
        })
    }
}

// ============================================================================
// Reaction Mappers
// ============================================================================

impl From<&ReactionCount> for ReactionResponse {
    fn from(count: &ReactionCount) -> Self {
        Self {
            reaction_type: count.reaction_type.to_string(),
            count: count.count,
            me: count.me,
        }
    }
}

impl From<ReactionCount> for ReactionResponse {
    fn from(count: ReactionCount) -> Self {
        Self::from(&count)
    }
}

impl From<&ReactionState> for ActiveReactionResponse {
    fn from(state: &ReactionState) -> Self {
        Self {
            author_id: state.key.author_id.to_string(),
            reaction_type: state.key.reaction_type.to_string(),
            position: state.position.map(|at| at.seconds()),
        }
    }
}

// ============================================================================
// Group Mappers
// ============================================================================

impl FeedbackGroupResponse {
    /// Render a group for `viewer`, who gets `me` set on their own reactions
    pub fn for_viewer(group: &FeedbackGroup, viewer: Option<feedback_core::Snowflake>) -> Self {
        Self {
            target_id: group.target_id.to_string(),
            center: group.center.seconds(),
            start: group.range.start.seconds(),
            end: group.range.end.seconds(),
            events: group.visible().map(FeedbackEventResponse::from).collect(),
            reactions: group
                .reaction_counts(viewer)
                .iter()
                .map(ReactionResponse::from)
                .collect(),
            comment_count: group.comments().count(),
        }
    }
}

impl From<&FeedbackGroup> for FeedbackGroupResponse {
    fn from(group: &FeedbackGroup) -> Self {
        Self::for_viewer(group, None)
    }
}

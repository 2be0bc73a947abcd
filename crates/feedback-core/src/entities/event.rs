//! Feedback event entity - one immutable piece of viewer feedback anchored to
//! a position on a target's timeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Snowflake, TimelinePosition};

use super::reaction::{ReactionKey, ReactionType};

/// What kind of feedback an event carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedbackKind {
    /// A reaction toggle. `active: false` is a tombstone.
    Reaction {
        reaction_type: ReactionType,
        author_id: Snowflake,
        active: bool,
    },
    Comment { author_id: Snowflake, body: String },
}

/// Feedback event entity
///
/// Events are append-only. Removing a reaction appends a new event with
/// `active: false`; nothing is ever edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub id: Snowflake,
    pub target_id: Snowflake,
    /// Timeline position the feedback is anchored to
    pub timestamp: TimelinePosition,
    pub kind: FeedbackKind,
    /// Wall-clock time the event was recorded (audit only)
    pub recorded_at: DateTime<Utc>,
}

impl FeedbackEvent {
    /// Create a reaction toggle event
    pub fn reaction(
        id: Snowflake,
        target_id: Snowflake,
        timestamp: TimelinePosition,
        author_id: Snowflake,
        reaction_type: ReactionType,
        active: bool,
    ) -> Self {
        Self {
            id,
            target_id,
            timestamp,
            kind: FeedbackKind::Reaction {
                reaction_type,
                author_id,
                active,
            },
            recorded_at: Utc::now(),
        }
    }

    /// Create a comment event
    pub fn comment(
        id: Snowflake,
        target_id: Snowflake,
        timestamp: TimelinePosition,
        author_id: Snowflake,
        body: String,
    ) -> Self {
        Self {
            id,
            target_id,
            timestamp,
            kind: FeedbackKind::Comment { author_id, body },
            recorded_at: Utc::now(),
        }
    }

    pub fn author_id(&self) -> Snowflake {
        match &self.kind {
            FeedbackKind::Reaction { author_id, .. } | FeedbackKind::Comment { author_id, .. } => {
                *author_id
            }
        }
    }

    #[inline]
    pub fn is_comment(&self) -> bool {
        matches!(self.kind, FeedbackKind::Comment { .. })
    }

    #[inline]
    pub fn is_reaction(&self) -> bool {
        matches!(self.kind, FeedbackKind::Reaction { .. })
    }

    /// A reaction event that deactivates its key
    #[inline]
    pub fn is_tombstone(&self) -> bool {
        matches!(self.kind, FeedbackKind::Reaction { active: false, .. })
    }

    /// Composite key for reaction events, `None` for comments
    pub fn reaction_key(&self) -> Option<ReactionKey> {
        match self.kind {
            FeedbackKind::Reaction {
                reaction_type,
                author_id,
                ..
            } => Some(ReactionKey::new(self.target_id, author_id, reaction_type)),
            FeedbackKind::Comment { .. } => None,
        }
    }

    pub fn reaction_type(&self) -> Option<ReactionType> {
        match self.kind {
            FeedbackKind::Reaction { reaction_type, .. } => Some(reaction_type),
            FeedbackKind::Comment { .. } => None,
        }
    }

    pub fn comment_body(&self) -> Option<&str> {
        match &self.kind {
            FeedbackKind::Comment { body, .. } => Some(body),
            FeedbackKind::Reaction { .. } => None,
        }
    }

    /// Ordering key used by the timeline index: position, then id
    #[inline]
    pub fn sort_key(&self) -> (TimelinePosition, Snowflake) {
        (self.timestamp, self.id)
    }
}

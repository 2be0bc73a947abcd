//! Reaction types and the per-viewer reaction toggle projection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FeedbackError;
use crate::value_objects::{Snowflake, TimelinePosition};

use super::event::{FeedbackEvent, FeedbackKind};

/// The fixed set of supported reaction kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    Like,
    Love,
    Laugh,
    Wow,
    Confused,
    Clap,
}

impl ReactionType {
    /// All supported kinds, in display order
    pub const ALL: [ReactionType; 6] = [
        Self::Like,
        Self::Love,
        Self::Laugh,
        Self::Wow,
        Self::Confused,
        Self::Clap,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Love => "love",
            Self::Laugh => "laugh",
            Self::Wow => "wow",
            Self::Confused => "confused",
            Self::Clap => "clap",
        }
    }
}

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionType {
    type Err = FeedbackError;

    /// Case-insensitive; anything outside the fixed set is rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| FeedbackError::InvalidReactionKind(s.to_string()))
    }
}

/// Composite key identifying one reaction's toggle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReactionKey {
    pub target_id: Snowflake,
    pub author_id: Snowflake,
    pub reaction_type: ReactionType,
}

impl ReactionKey {
    pub fn new(target_id: Snowflake, author_id: Snowflake, reaction_type: ReactionType) -> Self {
        Self {
            target_id,
            author_id,
            reaction_type,
        }
    }
}

impl fmt::Display for ReactionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.target_id, self.author_id, self.reaction_type)
    }
}

/// Current toggle state of one composite key
///
/// This is a projection: it only ever changes by folding in reaction events
/// from the log with [`ReactionState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionState {
    pub key: ReactionKey,
    pub active: bool,
    /// Number of toggle events folded in so far
    pub toggles: u64,
    pub last_event_id: Option<Snowflake>,
    /// Timeline position of the most recent toggle
    pub position: Option<TimelinePosition>,
}

impl ReactionState {
    /// A key that has never been toggled is inactive
    pub fn new(key: ReactionKey) -> Self {
        Self {
            key,
            active: false,
            toggles: 0,
            last_event_id: None,
            position: None,
        }
    }

    /// Fold one event into the projection
    ///
    /// Returns `false` (and leaves the state untouched) when the event is not
    /// a reaction event for this key.
    pub fn apply(&mut self, event: &FeedbackEvent) -> bool {
        match (&event.kind, event.reaction_key()) {
            (FeedbackKind::Reaction { active, .. }, Some(key)) if key == self.key => {
                self.active = *active;
                self.toggles += 1;
                self.last_event_id = Some(event.id);
                self.position = Some(event.timestamp);
                true
            }
            _ => false,
        }
    }
}

/// Aggregated reaction count for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCount {
    pub reaction_type: ReactionType,
    pub count: usize,
    /// Whether the requesting viewer is one of the reactors
    pub me: bool,
}

impl ReactionCount {
    pub fn new(reaction_type: ReactionType, count: usize, me: bool) -> Self {
        Self {
            reaction_type,
            count,
            me,
        }
    }
}

//! Domain entities - feedback events, reactions, and query-time groups

mod event;
mod group;
mod reaction;

pub use event::{FeedbackEvent, FeedbackKind};
pub use group::FeedbackGroup;
pub use reaction::{ReactionCount, ReactionKey, ReactionState, ReactionType};

//! # feedback-core
//!
//! Domain layer for timeline feedback: feedback events, reaction toggle
//! state, query-time groups, and the value objects they are built from.
//! This crate has no dependencies on infrastructure (locking, transport, etc.).

pub mod entities;
pub mod error;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    FeedbackEvent, FeedbackGroup, FeedbackKind, ReactionCount, ReactionKey, ReactionState,
    ReactionType,
};
pub use error::{FeedbackError, FeedbackResult};
pub use value_objects::{
    Snowflake, SnowflakeGenerator, SnowflakeParseError, TimeRange, TimelinePosition, WindowRadius,
};

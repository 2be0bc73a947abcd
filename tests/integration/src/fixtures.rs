//! Test fixtures and data generators
//!
//! Provides reusable ids and request builders for integration tests.

use std::sync::atomic::{AtomicI64, Ordering};

use feedback_core::Snowflake;
use feedback_service::dto::{CreateCommentRequest, GroupAroundQuery, ToggleReactionRequest};

/// Counter for unique test ids
static COUNTER: AtomicI64 = AtomicI64::new(1);

/// Get a unique id for a target or viewer
pub fn unique_id() -> Snowflake {
    Snowflake::new(COUNTER.fetch_add(1, Ordering::SeqCst))
}

pub fn toggle(author_id: Snowflake, position: f64) -> ToggleReactionRequest {
    ToggleReactionRequest {
        author_id,
        position,
    }
}

pub fn comment(author_id: Snowflake, body: &str, position: f64) -> CreateCommentRequest {
    CreateCommentRequest {
        author_id,
        body: body.to_string(),
        position,
    }
}

pub fn around(position: f64, window: Option<f64>) -> GroupAroundQuery {
    GroupAroundQuery {
        position,
        window,
        viewer_id: None,
    }
}

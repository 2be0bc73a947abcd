//! Append-only feedback event log
//!
//! The log is the source of truth for reaction history. Appends take a single
//! coarse write lock; ordering only matters within one reaction key's stream,
//! and the ledger appends a key's events while holding that key's lock.

use feedback_core::{FeedbackEvent, ReactionKey, Snowflake};
use parking_lot::RwLock;

/// Shared append-only log of every feedback event
#[derive(Debug, Default)]
pub struct EventLog {
    events: RwLock<Vec<FeedbackEvent>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, returning its offset in the log
    pub fn append(&self, event: FeedbackEvent) -> usize {
        let mut events = self.events.write();
        events.push(event);
        events.len() - 1
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Copy of the whole log in append order
    pub fn snapshot(&self) -> Vec<FeedbackEvent> {
        self.events.read().clone()
    }

    pub fn events_for_target(&self, target_id: Snowflake) -> Vec<FeedbackEvent> {
        self.events
            .read()
            .iter()
            .filter(|event| event.target_id == target_id)
            .cloned()
            .collect()
    }

    /// Every toggle of one reaction key, oldest first
    pub fn events_for_key(&self, key: ReactionKey) -> Vec<FeedbackEvent> {
        self.events
            .read()
            .iter()
            .filter(|event| event.reaction_key() == Some(key))
            .cloned()
            .collect()
    }
}

//! Feedback engine
//!
//! Wires the reaction ledger, the shared event log, and the window index
//! together. Every event the engine creates is appended to the log, ingested
//! by the index, and offered to live-feed subscribers, in that order, before
//! the call returns.

use std::sync::Arc;

use feedback_common::{AppConfig, FeedbackConfig};
use feedback_core::{
    FeedbackError, FeedbackEvent, FeedbackGroup, FeedbackResult, Snowflake, SnowflakeGenerator,
    TimelinePosition, WindowRadius,
};
use tokio::sync::broadcast;

use crate::index::FeedbackWindowIndex;
use crate::ledger::{ReactionLedger, ToggleResult};
use crate::log::EventLog;
use crate::peaks::PeakGroups;

/// Point-in-time counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStats {
    pub events_logged: usize,
    pub events_indexed: usize,
    pub targets: usize,
    pub reaction_keys: usize,
}

/// Facade over the ledger, log, and index
pub struct FeedbackEngine {
    config: FeedbackConfig,
    ids: Arc<SnowflakeGenerator>,
    log: Arc<EventLog>,
    ledger: ReactionLedger,
    index: FeedbackWindowIndex,
    feed: broadcast::Sender<FeedbackEvent>,
}

impl FeedbackEngine {
    /// Create an engine with its own empty event log
    pub fn new(config: FeedbackConfig, ids: Arc<SnowflakeGenerator>) -> Self {
        let log = Arc::new(EventLog::new());
        let ledger = ReactionLedger::new(Arc::clone(&ids), Arc::clone(&log));
        let index = FeedbackWindowIndex::new(config.window);
        let (feed, _) = broadcast::channel(config.broadcast_capacity.max(1));

        Self {
            config,
            ids,
            log,
            ledger,
            index,
            feed,
        }
    }

    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(
            config.feedback.clone(),
            Arc::new(SnowflakeGenerator::new(config.ids.worker_id)),
        )
    }

    /// Toggle a viewer's reaction and index the resulting event
    pub fn toggle_reaction(
        &self,
        target_id: Snowflake,
        author_id: Snowflake,
        reaction: &str,
        at_seconds: f64,
    ) -> FeedbackResult<ToggleResult> {
        let result = self.ledger.toggle(target_id, author_id, reaction, at_seconds)?;
        self.index.ingest(result.event.clone())?;
        self.publish(&result.event);
        Ok(result)
    }

    /// Record a comment anchored at a timeline position
    pub fn post_comment(
        &self,
        target_id: Snowflake,
        author_id: Snowflake,
        body: &str,
        at_seconds: f64,
    ) -> FeedbackResult<FeedbackEvent> {
        let at = TimelinePosition::new(at_seconds)?;
        let body = self.validate_comment(body)?;

        let event = FeedbackEvent::comment(self.ids.generate(), target_id, at, author_id, body);
        self.log.append(event.clone());
        self.index.ingest(event.clone())?;
        self.publish(&event);

        tracing::info!(
            event_id = %event.id,
            target_id = %target_id,
            author_id = %author_id,
            position = %at,
            "Comment posted"
        );

        Ok(event)
    }

    /// Group feedback near `position`; `window` defaults to the configured one
    pub fn group_around(
        &self,
        target_id: Snowflake,
        position: f64,
        window: Option<f64>,
    ) -> FeedbackResult<FeedbackGroup> {
        match window {
            Some(window) => self.index.group_around(target_id, position, window),
            None => self.index.group_around_default(target_id, position),
        }
    }

    /// Peak groups over the whole target; `window` defaults to the configured one
    pub fn groups_for_all_peaks(
        &self,
        target_id: Snowflake,
        window: Option<f64>,
    ) -> FeedbackResult<PeakGroups> {
        match window {
            Some(window) => self.index.groups_for_all_peaks(target_id, window),
            None => Ok(self.index.groups_for_all_peaks_default(target_id)),
        }
    }

    pub fn comments_for(&self, target_id: Snowflake) -> Vec<FeedbackEvent> {
        self.index.comments_for(target_id)
    }

    /// Receive every event the engine appends from now on
    ///
    /// Slow receivers observe `RecvError::Lagged` rather than blocking writers.
    pub fn subscribe(&self) -> broadcast::Receiver<FeedbackEvent> {
        self.feed.subscribe()
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            events_logged: self.log.len(),
            events_indexed: self.index.len(),
            targets: self.index.target_count(),
            reaction_keys: self.ledger.key_count(),
        }
    }

    pub fn ledger(&self) -> &ReactionLedger {
        &self.ledger
    }

    pub fn index(&self) -> &FeedbackWindowIndex {
        &self.index
    }

    pub fn log(&self) -> &Arc<EventLog> {
        &self.log
    }

    pub fn window(&self) -> WindowRadius {
        self.config.window
    }

    pub fn config(&self) -> &FeedbackConfig {
        &self.config
    }

    fn validate_comment(&self, body: &str) -> FeedbackResult<String> {
        let body = body.trim();
        if body.is_empty() {
            return Err(FeedbackError::ValidationError(
                "comment body must not be empty".to_string(),
            ));
        }
        let max = self.config.max_comment_length;
        if body.chars().count() > max {
            return Err(FeedbackError::ContentTooLong { max });
        }
        Ok(body.to_string())
    }

    fn publish(&self, event: &FeedbackEvent) {
        // No subscribers is not an error
        let _ = self.feed.send(event.clone());
    }
}

impl Default for FeedbackEngine {
    fn default() -> Self {
        Self::new(FeedbackConfig::default(), Arc::new(SnowflakeGenerator::default()))
    }
}

//! Reaction ledger
//!
//! Owns the toggle state of every (target, viewer, reaction kind) key and turns
//! toggle requests into reaction events on the shared log.
//!
//! State lives in a two-level lock table: `DashMap` by target, then `DashMap`
//! by (viewer, kind), with one `Mutex` per composite key. A toggle holds only
//! its own key's mutex while it reads, flips, assigns an id, and appends, so
//! toggles of the same key are serialized and toggles of different keys never
//! wait on each other. Map guards are always released before a key mutex is
//! taken.

use std::sync::Arc;

use dashmap::DashMap;
use feedback_core::{
    FeedbackEvent, FeedbackResult, ReactionCount, ReactionKey, ReactionState, ReactionType,
    Snowflake, SnowflakeGenerator, TimelinePosition,
};
use parking_lot::Mutex;

use crate::log::EventLog;

type KeyCell = Arc<Mutex<ReactionState>>;

/// Outcome of a successful toggle
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleResult {
    /// The event appended for this toggle
    pub event: FeedbackEvent,
    /// New state of the toggled key
    pub active: bool,
    /// Every active reaction on the target after the toggle, ordered by key
    pub reactions: Vec<ReactionState>,
}

/// Per-key reaction toggle state, projected from the event log
pub struct ReactionLedger {
    ids: Arc<SnowflakeGenerator>,
    log: Arc<EventLog>,
    targets: DashMap<Snowflake, DashMap<(Snowflake, ReactionType), KeyCell>>,
}

impl ReactionLedger {
    /// Create an empty ledger appending to `log`
    pub fn new(ids: Arc<SnowflakeGenerator>, log: Arc<EventLog>) -> Self {
        Self {
            ids,
            log,
            targets: DashMap::new(),
        }
    }

    /// Rebuild the projection by folding every reaction event already in `log`
    ///
    /// Events are folded in log order, which matches each key's toggle order.
    /// `ids` is advanced past every id already in the log, so new toggles
    /// always sort after the replayed history.
    pub fn replay(ids: Arc<SnowflakeGenerator>, log: Arc<EventLog>) -> Self {
        let ledger = Self::new(ids, log);
        let mut folded = 0usize;
        let mut newest = None;
        for event in ledger.log.snapshot() {
            newest = newest.max(Some(event.id));
            if let Some(key) = event.reaction_key() {
                ledger.cell(key).lock().apply(&event);
                folded += 1;
            }
        }
        if let Some(newest) = newest {
            ledger.ids.advance_past(newest);
        }
        tracing::debug!(events = folded, "Reaction ledger replayed from log");
        ledger
    }

    /// Toggle a reaction from unvalidated input
    ///
    /// Rejects unknown reaction kinds and invalid timeline positions before
    /// touching any state.
    pub fn toggle(
        &self,
        target_id: Snowflake,
        author_id: Snowflake,
        reaction: &str,
        at_seconds: f64,
    ) -> FeedbackResult<ToggleResult> {
        let reaction_type: ReactionType = reaction.parse()?;
        let at = TimelinePosition::new(at_seconds)?;
        Ok(self.toggle_kind(target_id, author_id, reaction_type, at))
    }

    /// Flip one key and append exactly one event recording its new state
    pub fn toggle_kind(
        &self,
        target_id: Snowflake,
        author_id: Snowflake,
        reaction_type: ReactionType,
        at: TimelinePosition,
    ) -> ToggleResult {
        let key = ReactionKey::new(target_id, author_id, reaction_type);
        let cell = self.cell(key);

        let (event, snapshot) = {
            let mut state = cell.lock();
            let active = !state.active;
            // Id is drawn under the key lock so id order is toggle order
            let event = FeedbackEvent::reaction(
                self.ids.generate(),
                target_id,
                at,
                author_id,
                reaction_type,
                active,
            );
            self.log.append(event.clone());
            state.apply(&event);
            (event, state.clone())
        };

        let active = !event.is_tombstone();
        tracing::info!(
            target_id = %target_id,
            author_id = %author_id,
            reaction = %reaction_type,
            position = %at,
            active,
            "Reaction toggled"
        );

        // Other keys are read after release; this key comes from its own
        // snapshot so the collection always agrees with `active`
        let mut reactions: Vec<ReactionState> = self
            .active_reactions(target_id)
            .into_iter()
            .filter(|state| state.key != key)
            .collect();
        if snapshot.active {
            reactions.push(snapshot);
        }
        reactions.sort_by_key(|state| state.key);

        ToggleResult {
            event,
            active,
            reactions,
        }
    }

    /// Current boolean for a key; never-toggled keys are inactive
    pub fn is_active(&self, key: ReactionKey) -> bool {
        self.state(key).is_some_and(|state| state.active)
    }

    /// Projection for a key, if it has ever been toggled
    pub fn state(&self, key: ReactionKey) -> Option<ReactionState> {
        let cell = self
            .targets
            .get(&key.target_id)?
            .get(&(key.author_id, key.reaction_type))
            .map(|cell| Arc::clone(cell.value()))?;
        let state = cell.lock().clone();
        Some(state)
    }

    /// Every active reaction on a target, ordered by key
    pub fn active_reactions(&self, target_id: Snowflake) -> Vec<ReactionState> {
        let mut active: Vec<ReactionState> = self
            .cells_for(target_id)
            .into_iter()
            .filter_map(|cell| {
                let state = cell.lock();
                state.active.then(|| state.clone())
            })
            .collect();
        active.sort_by_key(|state| state.key);
        active
    }

    /// Per-kind counts of active reactions on a target
    ///
    /// `me` is set on kinds the given viewer currently has active.
    pub fn reaction_counts(
        &self,
        target_id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> Vec<ReactionCount> {
        let active = self.active_reactions(target_id);
        ReactionType::ALL
            .into_iter()
            .filter_map(|kind| {
                let reactors: Vec<_> = active
                    .iter()
                    .filter(|state| state.key.reaction_type == kind)
                    .collect();
                if reactors.is_empty() {
                    return None;
                }
                let me = viewer.is_some_and(|viewer| {
                    reactors.iter().any(|state| state.key.author_id == viewer)
                });
                Some(ReactionCount::new(kind, reactors.len(), me))
            })
            .collect()
    }

    /// Full toggle history of one key, oldest first
    pub fn history(&self, key: ReactionKey) -> Vec<FeedbackEvent> {
        self.log.events_for_key(key)
    }

    /// Number of keys that have ever been toggled
    pub fn key_count(&self) -> usize {
        self.targets.iter().map(|target| target.len()).sum()
    }

    /// Get or create the lock cell for a key, releasing map guards on return
    fn cell(&self, key: ReactionKey) -> KeyCell {
        let inner_key = (key.author_id, key.reaction_type);

        if let Some(cells) = self.targets.get(&key.target_id) {
            if let Some(cell) = cells.get(&inner_key) {
                return Arc::clone(cell.value());
            }
        }

        let cells = self.targets.entry(key.target_id).or_default();
        let cell = cells
            .entry(inner_key)
            .or_insert_with(|| Arc::new(Mutex::new(ReactionState::new(key))));
        Arc::clone(cell.value())
    }

    fn cells_for(&self, target_id: Snowflake) -> Vec<KeyCell> {
        self.targets
            .get(&target_id)
            .map(|cells| cells.iter().map(|cell| Arc::clone(cell.value())).collect())
            .unwrap_or_default()
    }
}

//! Feedback window index
//!
//! Indexes every feedback event of a target by (timeline position, id) and
//! answers "what feedback is near position P" queries. The index only grows.
//!
//! Reaction visibility is decided at query time: a reaction event is shown
//! only if it is active and is the latest toggle of its key that the index has
//! seen. Ids increase with toggle order, so the latest toggle is the one with
//! the greatest id regardless of the order events were ingested in.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use dashmap::{DashMap, DashSet};
use feedback_core::{
    FeedbackError, FeedbackEvent, FeedbackGroup, FeedbackResult, ReactionKey, Snowflake,
    TimeRange, TimelinePosition, WindowRadius,
};
use parking_lot::RwLock;

use crate::peaks::PeakGroups;

/// All events of one target, ordered by timeline position then id
#[derive(Debug, Default)]
struct Timeline {
    events: BTreeMap<(TimelinePosition, Snowflake), FeedbackEvent>,
    /// Greatest event id seen per reaction key
    latest: HashMap<ReactionKey, Snowflake>,
}

impl Timeline {
    fn insert(&mut self, event: FeedbackEvent) {
        if let Some(key) = event.reaction_key() {
            self.latest
                .entry(key)
                .and_modify(|latest| *latest = (*latest).max(event.id))
                .or_insert(event.id);
        }
        self.events.insert(event.sort_key(), event);
    }

    fn is_hidden(&self, event: &FeedbackEvent) -> bool {
        match event.reaction_key() {
            Some(key) => event.is_tombstone() || self.latest.get(&key) != Some(&event.id),
            None => false,
        }
    }

    fn range(&self, range: TimeRange) -> impl Iterator<Item = &FeedbackEvent> + '_ {
        self.events
            .range((range.start, Snowflake::MIN)..=(range.end, Snowflake::MAX))
            .map(|(_, event)| event)
    }

    fn hidden_ids<'a>(&self, events: impl IntoIterator<Item = &'a FeedbackEvent>) -> HashSet<Snowflake> {
        events
            .into_iter()
            .filter(|event| self.is_hidden(event))
            .map(|event| event.id)
            .collect()
    }
}

/// Time-ordered index over the feedback event stream
pub struct FeedbackWindowIndex {
    default_window: WindowRadius,
    seen: DashSet<Snowflake>,
    timelines: DashMap<Snowflake, Arc<RwLock<Timeline>>>,
}

impl FeedbackWindowIndex {
    /// Create an empty index whose queries default to `default_window`
    pub fn new(default_window: WindowRadius) -> Self {
        Self {
            default_window,
            seen: DashSet::new(),
            timelines: DashMap::new(),
        }
    }

    pub fn default_window(&self) -> WindowRadius {
        self.default_window
    }

    /// Insert an event
    ///
    /// An id that has been ingested before is rejected with
    /// [`FeedbackError::DuplicateEvent`] and leaves the index unchanged.
    pub fn ingest(&self, event: FeedbackEvent) -> FeedbackResult<()> {
        if !self.seen.insert(event.id) {
            tracing::warn!(event_id = %event.id, target_id = %event.target_id, "Duplicate feedback event rejected");
            return Err(FeedbackError::DuplicateEvent(event.id));
        }

        tracing::debug!(
            event_id = %event.id,
            target_id = %event.target_id,
            position = %event.timestamp,
            "Feedback event ingested"
        );

        let timeline = self.timeline(event.target_id);
        timeline.write().insert(event);
        Ok(())
    }

    /// Group every event of `target_id` within `window` seconds of `position`
    ///
    /// Both bounds are inclusive. Events come back ordered by timestamp, ties
    /// broken by ascending id. No match yields an empty group.
    pub fn group_around(
        &self,
        target_id: Snowflake,
        position: f64,
        window: f64,
    ) -> FeedbackResult<FeedbackGroup> {
        let position = TimelinePosition::new(position)?;
        let window = WindowRadius::new(window)?;
        Ok(self.group_around_at(target_id, position, window))
    }

    /// [`group_around`](Self::group_around) using the configured window
    pub fn group_around_default(
        &self,
        target_id: Snowflake,
        position: f64,
    ) -> FeedbackResult<FeedbackGroup> {
        let position = TimelinePosition::new(position)?;
        Ok(self.group_around_at(target_id, position, self.default_window))
    }

    pub fn group_around_at(
        &self,
        target_id: Snowflake,
        center: TimelinePosition,
        window: WindowRadius,
    ) -> FeedbackGroup {
        let range = TimeRange::around(center, window);
        let Some(timeline) = self.existing_timeline(target_id) else {
            return FeedbackGroup::empty(target_id, center, range);
        };

        let timeline = timeline.read();
        let events: Vec<FeedbackEvent> = timeline.range(range).cloned().collect();
        let hidden = timeline.hidden_ids(&events);

        tracing::debug!(
            target_id = %target_id,
            center = %center,
            window = window.seconds(),
            matched = events.len(),
            "Grouped feedback around position"
        );

        FeedbackGroup::new(target_id, center, range, events, hidden)
    }

    /// Greedy left-to-right clustering of every event of `target_id`
    ///
    /// The returned sequence works on a snapshot taken now and yields groups
    /// lazily; see [`PeakGroups`].
    pub fn groups_for_all_peaks(
        &self,
        target_id: Snowflake,
        window: f64,
    ) -> FeedbackResult<PeakGroups> {
        let window = WindowRadius::new(window)?;
        Ok(self.peaks_with(target_id, window))
    }

    /// [`groups_for_all_peaks`](Self::groups_for_all_peaks) using the
    /// configured window
    pub fn groups_for_all_peaks_default(&self, target_id: Snowflake) -> PeakGroups {
        self.peaks_with(target_id, self.default_window)
    }

    pub fn peaks_with(&self, target_id: Snowflake, window: WindowRadius) -> PeakGroups {
        let (events, hidden) = match self.existing_timeline(target_id) {
            Some(timeline) => {
                let timeline = timeline.read();
                let events: Vec<FeedbackEvent> = timeline.events.values().cloned().collect();
                let hidden = timeline.hidden_ids(&events);
                (events, hidden)
            }
            None => (Vec::new(), HashSet::new()),
        };
        PeakGroups::new(target_id, window, events, hidden)
    }

    /// Comments on a target in timeline order
    pub fn comments_for(&self, target_id: Snowflake) -> Vec<FeedbackEvent> {
        self.existing_timeline(target_id)
            .map(|timeline| {
                timeline
                    .read()
                    .events
                    .values()
                    .filter(|event| event.is_comment())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn contains(&self, event_id: Snowflake) -> bool {
        self.seen.contains(&event_id)
    }

    /// Total number of events ingested, tombstones included
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Number of events ingested for one target
    pub fn target_len(&self, target_id: Snowflake) -> usize {
        self.existing_timeline(target_id)
            .map_or(0, |timeline| timeline.read().events.len())
    }

    pub fn target_count(&self) -> usize {
        self.timelines.len()
    }

    fn existing_timeline(&self, target_id: Snowflake) -> Option<Arc<RwLock<Timeline>>> {
        self.timelines
            .get(&target_id)
            .map(|timeline| Arc::clone(timeline.value()))
    }

    fn timeline(&self, target_id: Snowflake) -> Arc<RwLock<Timeline>> {
        if let Some(timeline) = self.existing_timeline(target_id) {
            return timeline;
        }
        Arc::clone(self.timelines.entry(target_id).or_default().value())
    }
}

impl Default for FeedbackWindowIndex {
    fn default() -> Self {
        Self::new(WindowRadius::DEFAULT)
    }
}

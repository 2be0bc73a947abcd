//! Feedback group - a query-time cluster of events near one timeline position

use std::collections::{BTreeMap, HashSet};

use crate::value_objects::{Snowflake, TimeRange, TimelinePosition};

use super::event::FeedbackEvent;
use super::reaction::{ReactionCount, ReactionType};

/// A transient cluster of feedback returned by the timeline index
///
/// `events` holds every indexed event in `range`, ordered by timestamp and
/// then id. Reaction events that are tombstones, or that were superseded by a
/// later toggle of the same key, stay in `events` but are left out of the
/// visible views.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackGroup {
    pub target_id: Snowflake,
    pub center: TimelinePosition,
    pub range: TimeRange,
    pub events: Vec<FeedbackEvent>,
    hidden: HashSet<Snowflake>,
}

impl FeedbackGroup {
    /// Build a group. `hidden` names the reaction events excluded from the
    /// visible views.
    pub fn new(
        target_id: Snowflake,
        center: TimelinePosition,
        range: TimeRange,
        events: Vec<FeedbackEvent>,
        hidden: HashSet<Snowflake>,
    ) -> Self {
        Self {
            target_id,
            center,
            range,
            events,
            hidden,
        }
    }

    pub fn empty(target_id: Snowflake, center: TimelinePosition, range: TimeRange) -> Self {
        Self::new(target_id, center, range, Vec::new(), HashSet::new())
    }

    /// Number of raw events, tombstones included
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether an event is part of the visible views
    pub fn is_visible(&self, event: &FeedbackEvent) -> bool {
        event.is_comment() || !self.hidden.contains(&event.id)
    }

    /// Comments plus currently active reactions, in group order
    pub fn visible(&self) -> impl Iterator<Item = &FeedbackEvent> + '_ {
        self.events.iter().filter(|event| self.is_visible(event))
    }

    pub fn visible_len(&self) -> usize {
        self.visible().count()
    }

    /// The active-reaction view
    pub fn reactions(&self) -> impl Iterator<Item = &FeedbackEvent> + '_ {
        self.visible().filter(|event| event.is_reaction())
    }

    /// Comments are never filtered
    pub fn comments(&self) -> impl Iterator<Item = &FeedbackEvent> + '_ {
        self.events.iter().filter(|event| event.is_comment())
    }

    /// Per-kind counts of the active reactions, in [`ReactionType::ALL`] order
    pub fn reaction_counts(&self, viewer: Option<Snowflake>) -> Vec<ReactionCount> {
        let mut counts: BTreeMap<ReactionType, (usize, bool)> = BTreeMap::new();
        for event in self.reactions() {
            if let Some(kind) = event.reaction_type() {
                let entry = counts.entry(kind).or_default();
                entry.0 += 1;
                entry.1 |= viewer == Some(event.author_id());
            }
        }
        counts
            .into_iter()
            .map(|(kind, (count, me))| ReactionCount::new(kind, count, me))
            .collect()
    }

    pub fn ids(&self) -> Vec<Snowflake> {
        self.events.iter().map(|event| event.id).collect()
    }

    pub fn timestamps(&self) -> Vec<f64> {
        self.events.iter().map(|event| event.timestamp.seconds()).collect()
    }
}

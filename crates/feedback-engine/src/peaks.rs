//! Greedy left-to-right clustering of a target's timeline
//!
//! The earliest event not yet grouped anchors a new group. Following events
//! are absorbed while each lies within the window of the previously absorbed
//! one, so the group re-centers as it grows. The cursor then moves past the
//! absorbed run. Every event lands in exactly one group and the groups come
//! out in timeline order.

use std::collections::HashSet;
use std::iter::FusedIterator;
use std::sync::Arc;

use feedback_core::{FeedbackEvent, FeedbackGroup, Snowflake, TimeRange, WindowRadius};

/// Lazy, restartable sequence of peak groups over a snapshot of one target
///
/// Cloning is cheap and the clone has its own cursor. [`PeakGroups::rewind`]
/// restarts the sequence from the first event.
#[derive(Debug, Clone)]
pub struct PeakGroups {
    target_id: Snowflake,
    window: WindowRadius,
    events: Arc<[FeedbackEvent]>,
    hidden: Arc<HashSet<Snowflake>>,
    cursor: usize,
}

impl PeakGroups {
    /// `events` must already be in (timestamp, id) order
    pub(crate) fn new(
        target_id: Snowflake,
        window: WindowRadius,
        events: Vec<FeedbackEvent>,
        hidden: HashSet<Snowflake>,
    ) -> Self {
        Self {
            target_id,
            window,
            events: events.into(),
            hidden: Arc::new(hidden),
            cursor: 0,
        }
    }

    pub fn window(&self) -> WindowRadius {
        self.window
    }

    /// Number of events in the snapshot
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Start over from the earliest event
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    fn remaining(&self) -> usize {
        self.events.len() - self.cursor
    }
}

impl Iterator for PeakGroups {
    type Item = FeedbackGroup;

    fn next(&mut self) -> Option<Self::Item> {
        let anchor = self.events.get(self.cursor)?;
        let start = self.cursor;
        let mut last = anchor.timestamp;
        let mut end = start + 1;

        while let Some(event) = self.events.get(end) {
            if event.timestamp > last.saturating_add(self.window) {
                break;
            }
            last = event.timestamp;
            end += 1;
        }
        self.cursor = end;

        let events = self.events[start..end].to_vec();
        let hidden = events
            .iter()
            .filter(|event| self.hidden.contains(&event.id))
            .map(|event| event.id)
            .collect();
        let range = TimeRange {
            start: anchor.timestamp.saturating_sub(self.window),
            end: last.saturating_add(self.window),
        };

        Some(FeedbackGroup::new(
            self.target_id,
            anchor.timestamp,
            range,
            events,
            hidden,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl FusedIterator for PeakGroups {}

#[cfg(test)]
mod tests {
    use super::*;
    use feedback_core::TimelinePosition;

    fn groups(timestamps: &[f64], window: f64) -> PeakGroups {
        let events = timestamps
            .iter()
            .enumerate()
            .map(|(i, at)| {
                FeedbackEvent::comment(
                    Snowflake::new(i as i64 + 1),
                    Snowflake::new(1),
                    TimelinePosition::new(*at).unwrap(),
                    Snowflake::new(9),
                    String::new(),
                )
            })
            .collect();
        PeakGroups::new(
            Snowflake::new(1),
            WindowRadius::new(window).unwrap(),
            events,
            HashSet::new(),
        )
    }

    fn timestamps(groups: PeakGroups) -> Vec<Vec<f64>> {
        groups.map(|group| group.timestamps()).collect()
    }

    #[test]
    fn test_scenario_yields_two_groups() {
        assert_eq!(
            timestamps(groups(&[2.0, 4.0, 9.0, 20.0], 5.0)),
            vec![vec![2.0, 4.0, 9.0], vec![20.0]]
        );
    }

    #[test]
    fn test_chain_extends_past_anchor_window() {
        // Each step is within 5s of the previous event, the whole run spans 20s
        assert_eq!(
            timestamps(groups(&[0.0, 5.0, 10.0, 15.0, 20.0], 5.0)),
            vec![vec![0.0, 5.0, 10.0, 15.0, 20.0]]
        );
    }

    #[test]
    fn test_isolated_events_form_singletons() {
        assert_eq!(
            timestamps(groups(&[1.0, 10.0, 30.0], 2.0)),
            vec![vec![1.0], vec![10.0], vec![30.0]]
        );
    }

    #[test]
    fn test_group_shape() {
        let group = groups(&[2.0, 4.0, 9.0, 20.0], 5.0).next().unwrap();
        assert_eq!(group.center.seconds(), 2.0);
        assert_eq!(group.range.start.seconds(), 0.0);
        assert_eq!(group.range.end.seconds(), 14.0);
    }

    #[test]
    fn test_restartable_and_fused() {
        let mut peaks = groups(&[2.0, 4.0, 9.0, 20.0], 5.0);
        let snapshot = peaks.clone();

        assert_eq!(peaks.by_ref().count(), 2);
        assert!(peaks.next().is_none());

        peaks.rewind();
        assert_eq!(peaks.count(), 2);
        assert_eq!(snapshot.count(), 2);
    }

    #[test]
    fn test_empty_snapshot() {
        let mut peaks = groups(&[], 5.0);
        assert_eq!(peaks.size_hint(), (0, Some(0)));
        assert!(peaks.next().is_none());
    }
}

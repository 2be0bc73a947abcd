//! Timeline value objects - positions, window radii, and closed ranges on a
//! target's media timeline
//!
//! All values are timeline seconds (an offset into a video or slide deck),
//! never wall-clock time.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::FeedbackError;

/// A validated, totally ordered position on a media timeline
///
/// Always finite and `>= 0`. Negative zero is normalized to zero so that
/// equality, hashing, and ordering agree.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TimelinePosition(f64);

impl TimelinePosition {
    pub const ZERO: TimelinePosition = TimelinePosition(0.0);

    /// Validate a raw timeline offset
    pub fn new(seconds: f64) -> Result<Self, FeedbackError> {
        if seconds.is_finite() && seconds >= 0.0 {
            Ok(Self(seconds + 0.0))
        } else {
            Err(FeedbackError::InvalidTimestamp(seconds))
        }
    }

    #[inline]
    pub fn seconds(self) -> f64 {
        self.0
    }

    /// Subtract a radius, clamping at the start of the timeline
    pub fn saturating_sub(self, radius: WindowRadius) -> Self {
        Self((self.0 - radius.seconds()).max(0.0))
    }

    /// Add a radius. Saturates at `f64::MAX` so the result stays finite.
    pub fn saturating_add(self, radius: WindowRadius) -> Self {
        Self((self.0 + radius.seconds()).min(f64::MAX))
    }
}

impl PartialEq for TimelinePosition {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TimelinePosition {}

impl PartialOrd for TimelinePosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimelinePosition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for TimelinePosition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl TryFrom<f64> for TimelinePosition {
    type Error = FeedbackError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TimelinePosition> for f64 {
    fn from(position: TimelinePosition) -> Self {
        position.0
    }
}

impl fmt::Display for TimelinePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Symmetric grouping radius in timeline seconds (finite, `> 0`)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct WindowRadius(f64);

impl WindowRadius {
    /// Default feedback window: 5 timeline seconds
    pub const DEFAULT: WindowRadius = WindowRadius(5.0);

    pub fn new(seconds: f64) -> Result<Self, FeedbackError> {
        if seconds.is_finite() && seconds > 0.0 {
            Ok(Self(seconds))
        } else {
            Err(FeedbackError::InvalidWindow(seconds))
        }
    }

    #[inline]
    pub fn seconds(self) -> f64 {
        self.0
    }
}

impl Default for WindowRadius {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for WindowRadius {
    type Error = FeedbackError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WindowRadius> for f64 {
    fn from(radius: WindowRadius) -> Self {
        radius.0
    }
}

/// Closed interval `[start, end]` on the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: TimelinePosition,
    pub end: TimelinePosition,
}

impl TimeRange {
    /// The window `[center - radius, center + radius]`, clamped at zero
    pub fn around(center: TimelinePosition, radius: WindowRadius) -> Self {
        Self {
            start: center.saturating_sub(radius),
            end: center.saturating_add(radius),
        }
    }
}

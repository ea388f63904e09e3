use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{History, NavigationOutcome};

/// Window length in minutes when nothing else is configured.
pub const DEFAULT_INTERVAL_DURATION: i32 = 60;

/// Time window relative to "now".
///
/// `offset` is the signed distance in minutes from now to the end of the
/// window and is never positive; `0` is realtime. `duration` is the window
/// length in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "TimeIntervalFields")]
pub struct TimeInterval {
    offset: i32,
    duration: i32,
}

#[derive(Deserialize)]
#[serde(default)]
struct TimeIntervalFields {
    offset: i32,
    duration: i32,
}

impl Default for TimeIntervalFields {
    fn default() -> Self {
        Self {
            offset: 0,
            duration: DEFAULT_INTERVAL_DURATION,
        }
    }
}

impl From<TimeIntervalFields> for TimeInterval {
    fn from(fields: TimeIntervalFields) -> Self {
        Self::new(fields.offset, fields.duration)
    }
}

impl Default for TimeInterval {
    fn default() -> Self {
        Self::realtime(DEFAULT_INTERVAL_DURATION)
    }
}

impl TimeInterval {
    /// Builds an interval, pinning positive offsets to realtime and negative
    /// durations to zero.
    #[must_use]
    pub fn new(offset: i32, duration: i32) -> Self {
        Self {
            offset: offset.min(0),
            duration: duration.max(0),
        }
    }

    #[must_use]
    pub fn realtime(duration: i32) -> Self {
        Self::new(0, duration)
    }

    #[must_use]
    pub fn offset(self) -> i32 {
        self.offset
    }

    #[must_use]
    pub fn duration(self) -> i32 {
        self.duration
    }

    #[must_use]
    pub fn is_realtime(self) -> bool {
        self.offset == 0
    }

    /// Moves one increment into the past, stopping at `-history.range`.
    pub fn rew_interval(self, history: History) -> NavigationOutcome<Self> {
        let target = self.offset.saturating_sub(history.time_increment);
        self.moved_to(target, history)
    }

    /// Moves one increment toward the present, stopping at realtime.
    pub fn ffwd_interval(self, history: History) -> NavigationOutcome<Self> {
        let target = self.offset.saturating_add(history.time_increment);
        self.moved_to(target, history)
    }

    /// Advances playback by one increment using the forward clamping rule.
    #[must_use]
    pub fn animation_step(self, history: History) -> Self {
        self.ffwd_interval(history).into_value()
    }

    /// Sets the offset, clamped into `[-history.range, 0]`.
    #[must_use]
    pub fn with_offset(self, offset: i32, history: History) -> Self {
        Self {
            offset: history.clamp_offset(offset),
            ..self
        }
    }

    #[must_use]
    pub fn with_duration(self, duration: i32) -> Self {
        Self {
            duration: duration.max(0),
            ..self
        }
    }

    /// Snaps back to realtime; `changed` is `false` when already there.
    pub fn go_realtime(self) -> NavigationOutcome<Self> {
        NavigationOutcome::new(Self { offset: 0, ..self }, !self.is_realtime())
    }

    /// Resolves the interval into absolute bounds relative to `now`.
    #[must_use]
    pub fn window_at(self, now: DateTime<Utc>) -> TimeWindow {
        let end = now + Duration::minutes(i64::from(self.offset));
        let start = end - Duration::minutes(i64::from(self.duration));
        TimeWindow { start, end }
    }

    fn moved_to(self, target: i32, history: History) -> NavigationOutcome<Self> {
        let next = self.with_offset(target, history);
        NavigationOutcome::new(next, next.offset != self.offset)
    }
}

/// Absolute `[start, end]` bounds of a resolved [`TimeInterval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    #[must_use]
    pub fn span(self) -> Duration {
        self.end - self.start
    }

    /// Inclusive on both ends.
    #[must_use]
    pub fn contains(self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

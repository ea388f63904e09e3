use serde::{Deserialize, Serialize};

use crate::core::region::{GLOBAL_REGION, LOCAL_REGION, UNSET_REGION};
use crate::core::{History, LocalReference, NavigationOutcome, TimeInterval};

/// Immutable snapshot of everything a strike data request depends on.
///
/// Every navigation method returns a new value; the receiver is left as is
/// so earlier snapshots held by in-flight requests stay valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub region: i32,
    pub raster_baselength: i32,
    pub interval: TimeInterval,
    pub count_threshold: i32,
    pub local_reference: Option<LocalReference>,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            region: UNSET_REGION,
            raster_baselength: 0,
            interval: TimeInterval::default(),
            count_threshold: 0,
            local_reference: None,
        }
    }
}

impl Parameters {
    #[must_use]
    pub fn interval_duration(self) -> i32 {
        self.interval.duration()
    }

    #[must_use]
    pub fn interval_offset(self) -> i32 {
        self.interval.offset()
    }

    #[must_use]
    pub fn is_global(self) -> bool {
        self.region == GLOBAL_REGION
    }

    #[must_use]
    pub fn is_local(self) -> bool {
        self.region == LOCAL_REGION
    }

    #[must_use]
    pub fn is_realtime(self) -> bool {
        self.interval.is_realtime()
    }

    pub fn rew_interval(self, history: History) -> NavigationOutcome<Self> {
        self.interval
            .rew_interval(history)
            .map(|interval| self.with_interval(interval))
    }

    pub fn ffwd_interval(self, history: History) -> NavigationOutcome<Self> {
        self.interval
            .ffwd_interval(history)
            .map(|interval| self.with_interval(interval))
    }

    #[must_use]
    pub fn animation_step(self, history: History) -> Self {
        self.with_interval(self.interval.animation_step(history))
    }

    pub fn go_realtime(self) -> NavigationOutcome<Self> {
        self.interval
            .go_realtime()
            .map(|interval| self.with_interval(interval))
    }

    #[must_use]
    pub fn with_interval_offset(self, offset: i32, history: History) -> Self {
        self.with_interval(self.interval.with_offset(offset, history))
    }

    /// Selects the window by position, `0` being the oldest step and
    /// [`Parameters::interval_max_position`] being realtime.
    #[must_use]
    pub fn with_position(self, position: i32, history: History) -> Self {
        let steps_back = position.saturating_sub(self.interval_max_position(history));
        let offset = steps_back.saturating_mul(history.time_increment);
        self.with_interval_offset(offset, history)
    }

    #[must_use]
    pub fn with_interval_duration(self, duration: i32) -> Self {
        self.with_interval(self.interval.with_duration(duration))
    }

    /// Inverse of [`Parameters::with_position`], clamped into
    /// `[0, interval_max_position]`.
    #[must_use]
    pub fn interval_position(self, history: History) -> i32 {
        if history.time_increment == 0 {
            return 0;
        }
        let max_position = self.interval_max_position(history);
        let steps_back = self.interval.offset() / history.time_increment;
        max_position.saturating_add(steps_back).clamp(0, max_position)
    }

    #[must_use]
    pub fn interval_max_position(self, history: History) -> i32 {
        if history.time_increment == 0 {
            return 0;
        }
        (history.range.saturating_sub(self.interval.duration()) / history.time_increment).max(0)
    }

    /// Switches region; a local reference only survives a switch to
    /// [`LOCAL_REGION`].
    #[must_use]
    pub fn with_region(self, region: i32) -> Self {
        let local_reference = if region == LOCAL_REGION {
            self.local_reference
        } else {
            None
        };
        Self {
            region,
            local_reference,
            ..self
        }
    }

    /// Anchors a local query and selects [`LOCAL_REGION`].
    #[must_use]
    pub fn with_local_reference(self, local_reference: LocalReference) -> Self {
        Self {
            region: LOCAL_REGION,
            local_reference: Some(local_reference),
            ..self
        }
    }

    #[must_use]
    pub fn with_raster_baselength(self, raster_baselength: i32) -> Self {
        Self {
            raster_baselength,
            ..self
        }
    }

    #[must_use]
    pub fn with_count_threshold(self, count_threshold: i32) -> Self {
        Self {
            count_threshold,
            ..self
        }
    }

    fn with_interval(self, interval: TimeInterval) -> Self {
        Self { interval, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::Parameters;
    use crate::core::region::{GLOBAL_REGION, LOCAL_REGION, UNSET_REGION};
    use crate::core::{History, LocalReference, TimeInterval};

    fn realtime_with_duration(duration: i32) -> Parameters {
        Parameters {
            interval: TimeInterval::realtime(duration),
            ..Parameters::default()
        }
    }

    #[test]
    fn default_region_is_neither_global_nor_local() {
        let parameters = Parameters::default();
        assert_eq!(parameters.region, UNSET_REGION);
        assert!(!parameters.is_global());
        assert!(!parameters.is_local());
        assert!(parameters.is_realtime());
        assert!(parameters.local_reference.is_none());
    }

    #[test]
    fn rewind_leaves_receiver_untouched() {
        let history = History::default();
        let original = Parameters::default().with_raster_baselength(10_000);

        let outcome = original.rew_interval(history);
        assert!(outcome.changed());
        assert_eq!(outcome.value().interval_offset(), -30);
        assert_eq!(outcome.value().raster_baselength, 10_000);
        assert_eq!(original.interval_offset(), 0);
    }

    #[test]
    fn forward_from_realtime_reports_no_change() {
        let outcome = Parameters::default().ffwd_interval(History::default());
        assert!(!outcome.changed());
        assert!(outcome.value().is_realtime());
    }

    #[test]
    fn max_position_accounts_for_duration() {
        let history = History::new(30, 1440);
        assert_eq!(realtime_with_duration(0).interval_max_position(history), 48);
        assert_eq!(realtime_with_duration(60).interval_max_position(history), 46);
        assert_eq!(realtime_with_duration(2000).interval_max_position(history), 0);
    }

    #[test]
    fn position_endpoints_map_to_oldest_and_realtime() {
        let history = History::new(30, 1440);
        let parameters = realtime_with_duration(0).with_interval_offset(-300, history);

        let oldest = parameters.with_position(0, history);
        assert_eq!(oldest.interval_offset(), -1440);
        assert_eq!(oldest.interval_position(history), 0);

        let max = parameters.interval_max_position(history);
        let newest = parameters.with_position(max, history);
        assert_eq!(newest.interval_offset(), 0);
        assert_eq!(newest.interval_position(history), max);
    }

    #[test]
    fn position_out_of_range_is_clamped() {
        let history = History::new(30, 1440);
        let parameters = realtime_with_duration(60);
        assert!(parameters.with_position(500, history).is_realtime());
        assert_eq!(
            parameters.with_position(-500, history).interval_offset(),
            -1440
        );
        // -1440 is two steps older than position 0 when the window is 60 minutes long.
        assert_eq!(
            parameters
                .with_interval_offset(-1440, history)
                .interval_position(history),
            0
        );
    }

    #[test]
    fn zero_increment_positions_are_zero() {
        let history = History::new(0, 1440);
        let parameters = realtime_with_duration(60).with_interval_offset(-120, History::default());
        assert_eq!(parameters.interval_max_position(history), 0);
        assert_eq!(parameters.interval_position(history), 0);
    }

    #[test]
    fn duration_change_keeps_offset() {
        let history = History::default();
        let parameters = Parameters::default()
            .with_interval_offset(-120, history)
            .with_interval_duration(180);
        assert_eq!(parameters.interval_offset(), -120);
        assert_eq!(parameters.interval_duration(), 180);
    }

    #[test]
    fn local_reference_selects_local_region_and_is_dropped_on_switch() {
        let local = Parameters::default().with_local_reference(LocalReference::new(3, -7));
        assert!(local.is_local());
        assert_eq!(local.local_reference, Some(LocalReference::new(3, -7)));

        let still_local = local.with_region(LOCAL_REGION);
        assert_eq!(still_local.local_reference, local.local_reference);

        let global = local.with_region(GLOBAL_REGION);
        assert!(global.is_global());
        assert!(global.local_reference.is_none());
    }

    #[test]
    fn go_realtime_preserves_other_fields() {
        let history = History::default();
        let parameters = Parameters::default()
            .with_count_threshold(5)
            .with_interval_offset(-600, history);
        let outcome = parameters.go_realtime();
        assert!(outcome.changed());
        let realtime = outcome.into_value();
        assert!(realtime.is_realtime());
        assert_eq!(realtime.count_threshold, 5);
        assert_eq!(realtime.interval_duration(), parameters.interval_duration());
    }
}

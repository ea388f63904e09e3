use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{History, Parameters, TimeWindow};
use crate::error::WindowResult;

use super::{DataChannel, DataChannels, SessionConfig};

/// Collaborator owning the current [`Parameters`] snapshot.
///
/// Implementors only provide storage; the navigation methods are derived
/// from the snapshot and replace it wholesale when it changes. The boolean
/// results report whether the snapshot moved.
pub trait DataHandler {
    fn is_capable_of_historical_data(&self) -> bool;

    fn parameters(&self) -> Parameters;

    fn history(&self) -> History;

    fn replace_parameters(&mut self, parameters: Parameters);

    /// Queues a refresh of the given channels for the current snapshot.
    fn update_data(&mut self, channels: &[DataChannel]);

    fn is_realtime(&self) -> bool {
        self.parameters().is_realtime()
    }

    fn rew_interval(&mut self) -> bool {
        let (next, changed) = self.parameters().rew_interval(self.history()).into_parts();
        replace_if_changed(self, next, changed)
    }

    fn ffwd_interval(&mut self) -> bool {
        let (next, changed) = self.parameters().ffwd_interval(self.history()).into_parts();
        replace_if_changed(self, next, changed)
    }

    fn go_realtime(&mut self) -> bool {
        let (next, changed) = self.parameters().go_realtime().into_parts();
        replace_if_changed(self, next, changed)
    }

    fn animation_step(&mut self) -> bool {
        let current = self.parameters();
        let next = current.animation_step(self.history());
        replace_if_changed(self, next, next != current)
    }

    fn set_interval_offset(&mut self, offset: i32) -> bool {
        let current = self.parameters();
        let next = current.with_interval_offset(offset, self.history());
        replace_if_changed(self, next, next != current)
    }

    fn set_interval_position(&mut self, position: i32) -> bool {
        let current = self.parameters();
        let next = current.with_position(position, self.history());
        replace_if_changed(self, next, next != current)
    }

    fn set_interval_duration(&mut self, duration: i32) -> bool {
        let current = self.parameters();
        let next = current.with_interval_duration(duration);
        replace_if_changed(self, next, next != current)
    }
}

fn replace_if_changed<H>(handler: &mut H, next: Parameters, changed: bool) -> bool
where
    H: DataHandler + ?Sized,
{
    if changed {
        trace!(
            offset = next.interval_offset(),
            duration = next.interval_duration(),
            "replace parameters"
        );
        handler.replace_parameters(next);
    }
    changed
}

/// Fetch description resolved against a wall-clock instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRequest {
    pub sequence: u64,
    pub parameters: Parameters,
    pub window: TimeWindow,
    pub channels: DataChannels,
}

/// In-memory [`DataHandler`] holding the session's current snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDataHandler {
    history: History,
    parameters: Parameters,
    capable_of_historical_data: bool,
    pending_channels: DataChannels,
    request_sequence: u64,
}

impl SessionDataHandler {
    /// Builds a handler from a validated configuration.
    pub fn from_config(config: SessionConfig) -> WindowResult<Self> {
        let config = config.validate()?;
        debug!(
            time_increment = config.history.time_increment,
            range = config.history.range,
            capable_of_historical_data = config.capable_of_historical_data,
            "create session data handler"
        );
        Ok(Self {
            history: config.history,
            parameters: config.parameters,
            capable_of_historical_data: config.capable_of_historical_data,
            pending_channels: SmallVec::new(),
            request_sequence: 0,
        })
    }

    #[must_use]
    pub fn has_pending_update(&self) -> bool {
        !self.pending_channels.is_empty()
    }

    /// Drains the queued refresh into a request for the window ending
    /// `offset` minutes before `now`.
    pub fn take_data_request(&mut self, now: DateTime<Utc>) -> Option<DataRequest> {
        if self.pending_channels.is_empty() {
            return None;
        }
        self.request_sequence += 1;
        let request = DataRequest {
            sequence: self.request_sequence,
            parameters: self.parameters,
            window: self.parameters.interval.window_at(now),
            channels: std::mem::take(&mut self.pending_channels),
        };
        debug!(
            sequence = request.sequence,
            start = %request.window.start,
            end = %request.window.end,
            channels = request.channels.len(),
            "issue data request"
        );
        Some(request)
    }
}

impl DataHandler for SessionDataHandler {
    fn is_capable_of_historical_data(&self) -> bool {
        self.capable_of_historical_data
    }

    fn parameters(&self) -> Parameters {
        self.parameters
    }

    fn history(&self) -> History {
        self.history
    }

    fn replace_parameters(&mut self, parameters: Parameters) {
        self.parameters = parameters;
    }

    fn update_data(&mut self, channels: &[DataChannel]) {
        for channel in channels {
            if !self.pending_channels.contains(channel) {
                self.pending_channels.push(*channel);
            }
        }
        trace!(pending = self.pending_channels.len(), "queue data update");
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::{DataHandler, SessionDataHandler};
    use crate::api::{DataChannel, SessionConfig};
    use crate::core::History;

    fn handler() -> SessionDataHandler {
        SessionDataHandler::from_config(SessionConfig::default()).expect("valid config")
    }

    #[test]
    fn rewind_then_forward_round_trips_to_realtime() {
        let mut handler = handler();
        assert!(handler.is_realtime());
        assert!(handler.rew_interval());
        assert_eq!(handler.parameters().interval_offset(), -30);
        assert!(!handler.is_realtime());
        assert!(handler.ffwd_interval());
        assert!(handler.is_realtime());
        assert!(!handler.ffwd_interval());
    }

    #[test]
    fn go_realtime_reports_only_real_transitions() {
        let mut handler = handler();
        assert!(!handler.go_realtime());
        assert!(handler.set_interval_offset(-300));
        assert!(handler.go_realtime());
        assert!(!handler.go_realtime());
    }

    #[test]
    fn setters_report_whether_snapshot_moved() {
        let mut handler = handler();
        assert!(!handler.set_interval_position(46));
        assert!(handler.set_interval_position(0));
        assert_eq!(handler.parameters().interval_offset(), -1380);
        assert!(!handler.set_interval_duration(60));
        assert!(handler.set_interval_duration(120));
        assert!(handler.animation_step());
        assert_eq!(handler.parameters().interval_offset(), -1350);
    }

    #[test]
    fn update_data_deduplicates_and_drains_into_request() {
        let mut handler = handler();
        assert!(handler.take_data_request(Utc::now()).is_none());

        handler.rew_interval();
        handler.update_data(&[DataChannel::Strikes]);
        handler.update_data(&[DataChannel::Strikes, DataChannel::Participants]);
        assert!(handler.has_pending_update());

        let now = Utc.with_ymd_and_hms(2024, 7, 15, 18, 30, 0).single().expect("now");
        let request = handler.take_data_request(now).expect("pending request");
        assert_eq!(request.sequence, 1);
        assert_eq!(
            request.channels.as_slice(),
            &[DataChannel::Strikes, DataChannel::Participants]
        );
        assert_eq!(request.window.end, now - Duration::minutes(30));
        assert_eq!(request.window.start, now - Duration::minutes(90));
        assert!(!handler.has_pending_update());
    }

    #[test]
    fn from_config_rejects_invalid_history() {
        let config = SessionConfig::default().with_history(History::new(0, 1440));
        assert!(SessionDataHandler::from_config(config).is_err());
    }
}

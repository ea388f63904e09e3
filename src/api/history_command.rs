use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Data stream a refresh request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataChannel {
    Strikes,
    Participants,
}

pub type DataChannels = SmallVec<[DataChannel; 2]>;

/// Navigation request coming from the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryCommand {
    Rewind,
    Forward,
    GoRealtime,
    /// Playback tick; never gated on visibility and never locks the column.
    AnimationStep,
    SetOffset(i32),
    SetPosition(i32),
    SetDuration(i32),
}

impl HistoryCommand {
    /// Commands that only make sense when historical data can be fetched.
    #[must_use]
    pub fn requires_historical_data(self) -> bool {
        !matches!(self, Self::GoRealtime | Self::SetDuration(_))
    }
}

/// Side effect the host must carry out after a dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryEffect {
    /// A data refresh was requested for these channels.
    DataRequested(DataChannels),
    /// Realtime was reached; polling has to be restarted.
    RestartRealtime,
    /// Rewind hit the oldest step; show a "limit reached" notice.
    HistoricLimitReached,
}

/// Visibility of the three history buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ButtonVisibility {
    pub rewind: bool,
    pub forward: bool,
    pub go_realtime: bool,
}

impl ButtonVisibility {
    pub const HIDDEN: Self = Self {
        rewind: false,
        forward: false,
        go_realtime: false,
    };

    #[must_use]
    pub fn any_visible(self) -> bool {
        self.rewind || self.forward || self.go_realtime
    }
}

/// Outcome of a fetch the host performed, fed back into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataResult {
    pub failed: bool,
    pub contains_realtime_data: bool,
}

/// Everything a dispatch produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryReaction {
    /// `false` when the command was dropped (locked column or no history).
    pub accepted: bool,
    pub effects: SmallVec<[HistoryEffect; 2]>,
    pub visibility: ButtonVisibility,
    pub column_locked: bool,
}

impl HistoryReaction {
    #[must_use]
    pub fn has_effect(&self, effect: &HistoryEffect) -> bool {
        self.effects.contains(effect)
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{WindowError, WindowResult};

/// Minutes per navigation step when nothing else is configured.
pub const DEFAULT_OFFSET_INCREMENT: i32 = 30;
/// Navigable history span in minutes (one day).
pub const MAX_HISTORY_RANGE: i32 = 24 * 60;

/// Granularity and span of the navigable history.
///
/// Both values are minutes. Navigation tolerates degenerate values (a zero
/// increment turns rewind/forward into no-ops), so construction is
/// unchecked; use [`History::validate`] on untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct History {
    pub time_increment: i32,
    pub range: i32,
}

impl Default for History {
    fn default() -> Self {
        Self {
            time_increment: DEFAULT_OFFSET_INCREMENT,
            range: MAX_HISTORY_RANGE,
        }
    }
}

impl History {
    #[must_use]
    pub const fn new(time_increment: i32, range: i32) -> Self {
        Self {
            time_increment,
            range,
        }
    }

    /// Checks `time_increment > 0`, `range > 0` and `range >= time_increment`.
    pub fn validate(self) -> WindowResult<Self> {
        if self.time_increment <= 0 || self.range <= 0 || self.range < self.time_increment {
            return Err(WindowError::InvalidHistory {
                time_increment: self.time_increment,
                range: self.range,
            });
        }
        Ok(self)
    }

    /// Most negative offset a window may reach.
    #[must_use]
    pub fn oldest_offset(self) -> i32 {
        self.range.max(0).saturating_neg()
    }

    /// Clamps an offset into `[oldest_offset, 0]`.
    #[must_use]
    pub fn clamp_offset(self, offset: i32) -> i32 {
        offset.clamp(self.oldest_offset(), 0)
    }
}

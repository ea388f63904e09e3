use smallvec::{SmallVec, smallvec};
use tracing::{debug, trace, warn};

use super::{
    ButtonVisibility, DataChannel, DataHandler, DataResult, HistoryCommand, HistoryEffect,
    HistoryReaction,
};

/// Command-driven state machine behind the rewind / forward / go-realtime
/// buttons.
///
/// The controller keeps only presentation state: which buttons are visible
/// and whether the button column is locked while a fetch is in flight.
/// Parameters live in the [`DataHandler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryController {
    visibility: ButtonVisibility,
    column_locked: bool,
}

impl HistoryController {
    /// Creates a controller showing realtime data.
    pub fn new<H: DataHandler + ?Sized>(handler: &H) -> Self {
        let mut controller = Self {
            visibility: ButtonVisibility::HIDDEN,
            column_locked: false,
        };
        controller.set_realtime_data(true, handler);
        controller
    }

    #[must_use]
    pub fn visibility(&self) -> ButtonVisibility {
        self.visibility
    }

    #[must_use]
    pub fn is_column_locked(&self) -> bool {
        self.column_locked
    }

    /// Recomputes visibility for data that is (or is not) realtime.
    pub fn set_realtime_data<H: DataHandler + ?Sized>(
        &mut self,
        realtime_data: bool,
        handler: &H,
    ) {
        self.visibility = if handler.is_capable_of_historical_data() {
            ButtonVisibility {
                rewind: true,
                forward: !realtime_data,
                go_realtime: !realtime_data,
            }
        } else {
            ButtonVisibility::HIDDEN
        };
        trace!(realtime_data, visibility = ?self.visibility, "update history buttons");
    }

    /// Consumes the result of a fetch and releases the button column.
    pub fn on_data_result<H: DataHandler + ?Sized>(&mut self, result: DataResult, handler: &H) {
        self.column_locked = false;
        if result.failed {
            warn!("data fetch failed; keeping history button state");
            return;
        }
        self.set_realtime_data(result.contains_realtime_data, handler);
    }

    /// Applies a command to `handler` and reports what the host must do.
    pub fn dispatch<H: DataHandler + ?Sized>(
        &mut self,
        command: HistoryCommand,
        handler: &mut H,
    ) -> HistoryReaction {
        if self.column_locked && command != HistoryCommand::AnimationStep {
            debug!(?command, "button column locked; dropping history command");
            return self.reaction(false, SmallVec::new());
        }
        if command.requires_historical_data() && !handler.is_capable_of_historical_data() {
            warn!(?command, "data source has no history; dropping history command");
            return self.reaction(false, SmallVec::new());
        }

        debug!(
            ?command,
            offset = handler.parameters().interval_offset(),
            "dispatch history command"
        );
        let effects = match command {
            HistoryCommand::Rewind => {
                if handler.rew_interval() {
                    self.show_history_navigation();
                    self.request_strikes(handler)
                } else {
                    smallvec![HistoryEffect::HistoricLimitReached]
                }
            }
            HistoryCommand::Forward => {
                if handler.ffwd_interval() {
                    self.after_step(handler)
                } else {
                    SmallVec::new()
                }
            }
            HistoryCommand::GoRealtime => {
                if handler.go_realtime() {
                    self.configure_for_realtime_operation()
                } else {
                    SmallVec::new()
                }
            }
            HistoryCommand::AnimationStep => {
                if handler.animation_step() {
                    self.after_step(handler)
                } else {
                    SmallVec::new()
                }
            }
            HistoryCommand::SetOffset(offset) => {
                let moved = handler.set_interval_offset(offset);
                self.after_set(moved, handler)
            }
            HistoryCommand::SetPosition(position) => {
                let moved = handler.set_interval_position(position);
                self.after_set(moved, handler)
            }
            HistoryCommand::SetDuration(duration) => {
                let moved = handler.set_interval_duration(duration);
                self.after_set(moved, handler)
            }
        };

        self.reaction(true, effects)
    }

    fn after_set<H: DataHandler + ?Sized>(
        &mut self,
        moved: bool,
        handler: &mut H,
    ) -> SmallVec<[HistoryEffect; 2]> {
        if !moved {
            return SmallVec::new();
        }
        if !handler.is_realtime() {
            self.show_history_navigation();
        }
        self.after_move(handler)
    }

    fn after_move<H: DataHandler + ?Sized>(
        &mut self,
        handler: &mut H,
    ) -> SmallVec<[HistoryEffect; 2]> {
        if handler.is_realtime() {
            self.configure_for_realtime_operation()
        } else {
            self.request_strikes(handler)
        }
    }

    /// Forward and playback steps refresh without locking the column;
    /// reaching realtime still switches to realtime operation.
    fn after_step<H: DataHandler + ?Sized>(
        &mut self,
        handler: &mut H,
    ) -> SmallVec<[HistoryEffect; 2]> {
        if handler.is_realtime() {
            self.configure_for_realtime_operation()
        } else {
            refresh_strikes(handler)
        }
    }

    fn show_history_navigation(&mut self) {
        self.visibility.forward = true;
        self.visibility.go_realtime = true;
    }

    fn configure_for_realtime_operation(&mut self) -> SmallVec<[HistoryEffect; 2]> {
        self.column_locked = true;
        self.visibility.forward = false;
        self.visibility.go_realtime = false;
        smallvec![HistoryEffect::RestartRealtime]
    }

    fn request_strikes<H: DataHandler + ?Sized>(
        &mut self,
        handler: &mut H,
    ) -> SmallVec<[HistoryEffect; 2]> {
        self.column_locked = true;
        refresh_strikes(handler)
    }

    fn reaction(&self, accepted: bool, effects: SmallVec<[HistoryEffect; 2]>) -> HistoryReaction {
        HistoryReaction {
            accepted,
            effects,
            visibility: self.visibility,
            column_locked: self.column_locked,
        }
    }
}

fn refresh_strikes<H: DataHandler + ?Sized>(handler: &mut H) -> SmallVec<[HistoryEffect; 2]> {
    handler.update_data(&[DataChannel::Strikes]);
    smallvec![HistoryEffect::DataRequested(smallvec![DataChannel::Strikes])]
}

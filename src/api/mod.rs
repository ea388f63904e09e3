mod data_handler;
mod history_command;
mod history_controller;
mod session_config;

pub use data_handler::{DataHandler, DataRequest, SessionDataHandler};
pub use history_command::{
    ButtonVisibility, DataChannel, DataChannels, DataResult, HistoryCommand, HistoryEffect,
    HistoryReaction,
};
pub use history_controller::HistoryController;
pub use session_config::{SESSION_CONFIG_JSON_SCHEMA_V1, SessionConfig};

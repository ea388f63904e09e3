//! strike-window: time-window navigation for lightning strike data requests.
//!
//! `core` holds the immutable `Parameters` / `History` / `TimeInterval`
//! model. `api` wires it to a data source through the `DataHandler` trait
//! and drives the history buttons through command dispatch.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{HistoryCommand, HistoryController, SessionConfig, SessionDataHandler};
pub use crate::core::{History, NavigationOutcome, Parameters, TimeInterval};
pub use error::{WindowError, WindowResult};

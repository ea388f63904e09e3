pub mod history;
pub mod navigation;
pub mod parameters;
pub mod region;
pub mod time_interval;

pub use history::{DEFAULT_OFFSET_INCREMENT, History, MAX_HISTORY_RANGE};
pub use navigation::NavigationOutcome;
pub use parameters::Parameters;
pub use region::{GLOBAL_REGION, LOCAL_REGION, LocalReference, UNSET_REGION};
pub use time_interval::{DEFAULT_INTERVAL_DURATION, TimeInterval, TimeWindow};

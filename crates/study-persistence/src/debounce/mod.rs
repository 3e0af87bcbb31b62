//! Trailing-edge input debouncing.
//!
//! Provides:
//! - `Debouncer` - holds the latest value until its quiet period elapses
//! - `Clock` - time source (`SystemClock`, `ManualClock` for tests)
//! - `DebounceConfig` - quiet periods for filter and search input

mod clock;
mod config;
mod debouncer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::DebounceConfig;
pub use debouncer::Debouncer;

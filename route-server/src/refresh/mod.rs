//! Periodic refresh of the itinerary.
//!
//! Startup requests the origin once and builds the directions client once.
//! After that a timer starts one aggregation cycle per interval, skipping
//! ticks while a cycle is still running, and commits each result to a
//! [`RefreshState`] that readers observe through a `watch` channel.

mod config;
mod scheduler;
mod state;


pub use config::{DEFAULT_INTERVAL, MIN_INTERVAL, RefreshConfig};
pub use scheduler::{CycleOutcome, RefreshScheduler};
pub use state::{Phase, RefreshState, StartupFailure, StartupStage};

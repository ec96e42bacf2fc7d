//! Application state for the web layer.

use std::time::Duration;

use tokio::sync::watch;

use crate::refresh::RefreshState;

/// Shared application state.
///
/// Handlers only ever read the refresh state; the scheduler is its sole
/// writer.
#[derive(Clone)]
pub struct AppState {
    /// Latest refresh state
    pub refresh: watch::Receiver<RefreshState>,

    /// How often the page should reload
    pub refresh_interval: Duration,
}

impl AppState {
    pub fn new(refresh: watch::Receiver<RefreshState>, refresh_interval: Duration) -> Self {
        Self {
            refresh,
            refresh_interval,
        }
    }

    /// A copy of the current refresh state.
    pub fn snapshot(&self) -> RefreshState {
        self.refresh.borrow().clone()
    }
}

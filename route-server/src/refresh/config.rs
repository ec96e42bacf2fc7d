//! Refresh scheduler configuration.

use std::time::Duration;

use crate::itinerary::AggregatorConfig;

/// Default refresh cadence.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

/// Shortest refresh cadence the scheduler will run at.
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for the refresh scheduler.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Wall-clock period between cycle starts. Values below
    /// [`MIN_INTERVAL`] are raised to it.
    pub interval: Duration,

    /// Run the first cycle as soon as the scheduler is ready rather than
    /// one interval later.
    pub first_tick_immediate: bool,

    /// How each cycle builds its itinerary.
    pub aggregator: AggregatorConfig,
}

impl RefreshConfig {
    pub fn new(interval: Duration, aggregator: AggregatorConfig) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            first_tick_immediate: true,
            aggregator,
        }
    }

    /// Set the refresh interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(MIN_INTERVAL);
        self
    }

    /// The cadence the scheduler actually runs at.
    pub fn period(&self) -> Duration {
        self.interval.max(MIN_INTERVAL)
    }

    /// Wait a full interval before the first cycle.
    pub fn with_delayed_first_tick(mut self) -> Self {
        self.first_tick_immediate = false;
        self
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            first_tick_immediate: true,
            aggregator: AggregatorConfig::default(),
        }
    }
}

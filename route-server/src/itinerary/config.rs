//! Aggregation settings.

use std::fmt;
use std::str::FromStr;

/// Address substituted for a failed lookup under
/// [`GeocodeFailurePolicy::Placeholder`].
pub const DEFAULT_PLACEHOLDER: &str = "Unknown location";

/// What a refresh cycle does when a single label cannot be geocoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GeocodeFailurePolicy {
    /// Fail the whole cycle and keep showing the previous itinerary.
    #[default]
    AbortCycle,
    /// Label the stop with this text instead of an address.
    Placeholder(String),
}

impl fmt::Display for GeocodeFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodeFailurePolicy::AbortCycle => f.write_str("abort"),
            GeocodeFailurePolicy::Placeholder(_) => f.write_str("placeholder"),
        }
    }
}

/// Error parsing a policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown geocode failure policy {0:?} (expected \"abort\" or \"placeholder\")")]
pub struct UnknownPolicy(String);

impl FromStr for GeocodeFailurePolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(GeocodeFailurePolicy::AbortCycle),
            "placeholder" => Ok(GeocodeFailurePolicy::Placeholder(
                DEFAULT_PLACEHOLDER.to_string(),
            )),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

/// Configuration for building itineraries.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// How a failed label lookup is handled.
    pub geocode_policy: GeocodeFailurePolicy,

    /// Also geocode the first leg's start to name the current position.
    pub label_origin: bool,
}

impl AggregatorConfig {
    pub fn new(geocode_policy: GeocodeFailurePolicy, label_origin: bool) -> Self {
        Self {
            geocode_policy,
            label_origin,
        }
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            geocode_policy: GeocodeFailurePolicy::AbortCycle,
            label_origin: true,
        }
    }
}

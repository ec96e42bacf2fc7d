//! Itinerary aggregation.
//!
//! Orchestrates the route provider and the name resolver into an ordered,
//! labeled itinerary: one route request per cycle, then one concurrent
//! name lookup per leg end.

mod aggregator;
mod config;
mod error;
mod provider;

#[cfg(test)]
pub(crate) mod stubs;

pub use aggregator::{Aggregator, CycleOutput};
pub use config::{AggregatorConfig, DEFAULT_PLACEHOLDER, GeocodeFailurePolicy, UnknownPolicy};
pub use error::CycleError;
pub use provider::{NameResolver, RouteProvider};

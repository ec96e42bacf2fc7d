//! Refresh cycle errors.

use crate::directions::RouteError;
use crate::geocoding::GeocodeError;

/// Why a refresh cycle produced no itinerary.
///
/// All variants are recoverable: the previous itinerary stays published
/// and the next tick tries again.
#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    /// The route request failed
    #[error("route request failed: {0}")]
    Route(#[from] RouteError),

    /// A stop label could not be resolved (abort policy)
    #[error("could not name stop {index}: {source}")]
    Geocode {
        index: usize,
        #[source]
        source: GeocodeError,
    },

    /// The provider returned a different number of legs than requested
    #[error("provider returned {actual} legs for {expected} stops")]
    LegCountMismatch { expected: usize, actual: usize },
}

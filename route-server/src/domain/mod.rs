//! Domain types for the live route refresher.
//!
//! Value types that every other module exchanges: coordinates, stops,
//! routed legs and the labeled itinerary. Validation happens at
//! construction time, so code that receives these types can trust them.

mod coordinate;
mod itinerary;
mod leg;
mod stop;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use itinerary::{Itinerary, ResolvedStopLabel, display_name};
pub use leg::{Leg, Route};
pub use stop::{Stop, StopId};

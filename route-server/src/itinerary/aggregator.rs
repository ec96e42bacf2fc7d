//! Itinerary aggregation.
//!
//! One run of the aggregator is the body of a refresh cycle: order the
//! stops, request a single route through them, then name every leg's end
//! point concurrently and assemble the labeled itinerary.
//!
//! The aggregator never publishes anything itself. It either returns a
//! complete itinerary or an error; the scheduler decides whether the
//! result is still current enough to commit.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::{Coordinate, Itinerary, ResolvedStopLabel, Route, Stop, display_name};
use crate::geocoding::GeocodeError;

use super::config::{AggregatorConfig, GeocodeFailurePolicy};
use super::error::CycleError;
use super::provider::{NameResolver, RouteProvider};

/// Everything one successful cycle produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleOutput {
    pub itinerary: Itinerary,

    /// The routed path, absent when there was nothing to route.
    pub route: Option<Route>,
}

impl CycleOutput {
    fn empty() -> Self {
        Self {
            itinerary: Itinerary::empty(),
            route: None,
        }
    }
}

/// Builds labeled itineraries from a route provider and a name resolver.
pub struct Aggregator<'a, R, G> {
    directions: &'a R,
    geocoder: &'a G,
    config: &'a AggregatorConfig,
}

impl<'a, R: RouteProvider, G: NameResolver> Aggregator<'a, R, G> {
    pub fn new(directions: &'a R, geocoder: &'a G, config: &'a AggregatorConfig) -> Self {
        Self {
            directions,
            geocoder,
            config,
        }
    }

    /// Build the itinerary from `origin` through every stop.
    ///
    /// The last stop (by `order`) is the destination; earlier stops are
    /// visited in order as waypoints. With no stops there is nothing to
    /// route and an empty itinerary is returned without calling any
    /// provider.
    #[tracing::instrument(skip_all, fields(origin = %origin, stops = stops.len()))]
    pub async fn run(&self, origin: Coordinate, stops: &[Stop]) -> Result<CycleOutput, CycleError> {
        let mut ordered: Vec<&Stop> = stops.iter().collect();
        ordered.sort_by_key(|s| s.order);

        let Some((destination, intermediate)) = ordered.split_last() else {
            debug!("No stops to route");
            return Ok(CycleOutput::empty());
        };

        let waypoints: Vec<Coordinate> = intermediate.iter().map(|s| s.position).collect();

        let route = self
            .directions
            .compute_route(origin, destination.position, &waypoints)
            .await?;

        if route.legs.len() != ordered.len() {
            return Err(CycleError::LegCountMismatch {
                expected: ordered.len(),
                actual: route.legs.len(),
            });
        }

        let (addresses, origin_name) = self.resolve_names(&route).await;

        let mut labels = Vec::with_capacity(ordered.len());

        for (index, ((leg, stop), address)) in route
            .legs
            .iter()
            .zip(ordered.iter())
            .zip(addresses)
            .enumerate()
        {
            let address = match (address, &self.config.geocode_policy) {
                (Ok(address), _) => address,
                (Err(source), GeocodeFailurePolicy::AbortCycle) => {
                    return Err(CycleError::Geocode { index, source });
                }
                (Err(e), GeocodeFailurePolicy::Placeholder(placeholder)) => {
                    warn!(
                        index,
                        stop = %stop.name,
                        error = %e,
                        "Could not name stop, using placeholder"
                    );
                    placeholder.clone()
                }
            };

            labels.push(ResolvedStopLabel {
                index,
                display_name: display_name(&address, &stop.name),
                stop_id: stop.id,
                stop_name: stop.name.clone(),
                order: stop.order,
                distance: leg.distance_text.clone(),
                eta: leg.duration_text.clone(),
                distance_meters: leg.distance_meters,
                duration_secs: leg.duration_secs,
                position: leg.end,
            });
        }

        debug!(legs = labels.len(), "Built itinerary");

        Ok(CycleOutput {
            itinerary: Itinerary {
                labels,
                origin_name,
            },
            route: Some(route),
        })
    }

    /// Resolve every leg end, plus the origin when configured, concurrently.
    ///
    /// Returns only once every lookup has finished or failed. A failed
    /// origin lookup is logged and yields `None`; it never fails the cycle.
    async fn resolve_names(
        &self,
        route: &Route,
    ) -> (Vec<Result<String, GeocodeError>>, Option<String>) {
        let ends = join_all(
            route
                .legs
                .iter()
                .map(|leg| self.geocoder.resolve_name(leg.end)),
        );

        let origin = async {
            let start = route.legs.first().map(|leg| leg.start)?;
            if !self.config.label_origin {
                return None;
            }
            match self.geocoder.resolve_name(start).await {
                Ok(name) => Some(name),
                Err(e) => {
                    warn!(error = %e, "Could not name current position");
                    None
                }
            }
        };

        futures::join!(ends, origin)
    }
}

//! Directions HTTP client.
//!
//! Requests driving routes through an ordered list of stops. Waypoints
//! are sent as stopovers in the given order and optimisation is never
//! requested, so the provider keeps the business visiting order.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Coordinate, Route};
use crate::itinerary::RouteProvider;
use crate::maps::{ClientInitError, MapsConfig, truncate_body};

use super::convert::convert_directions;
use super::error::RouteError;
use super::types::DirectionsResponse;

/// Provider ceiling on waypoints per request.
pub const MAX_WAYPOINTS: usize = 25;

/// Travel mode requested for every route.
const TRAVEL_MODE: &str = "driving";

/// Directions API client.
#[derive(Debug, Clone)]
pub struct DirectionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    semaphore: Arc<Semaphore>,
}

impl DirectionsClient {
    /// Create a new directions client with the given configuration.
    pub fn new(config: MapsConfig) -> Result<Self, ClientInitError> {
        let http = config.http_client()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.trim().to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Request a route from `origin` through `waypoints` to `destination`.
    ///
    /// Returns one leg per consecutive pair of points. Fails without any
    /// network traffic if there are more waypoints than the provider accepts.
    pub async fn get_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        waypoints: &[Coordinate],
    ) -> Result<Route, RouteError> {
        if waypoints.len() > MAX_WAYPOINTS {
            return Err(RouteError::TooManyWaypoints {
                count: waypoints.len(),
                max: MAX_WAYPOINTS,
            });
        }

        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| RouteError::LimiterClosed)?;

        let url = format!("{}/maps/api/directions/json", self.base_url);

        let mut query = vec![
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
            ("mode", TRAVEL_MODE.to_string()),
            ("key", self.api_key.clone()),
        ];
        if let Some(waypoints) = waypoints_param(waypoints) {
            query.push(("waypoints", waypoints));
        }

        debug!(
            origin = %origin,
            destination = %destination,
            waypoints = waypoints.len(),
            "Requesting directions"
        );

        let response = self.http.get(&url).query(&query).send().await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RouteError::Api {
                status: status.as_u16(),
                message: truncate_body(&body),
            });
        }

        let body = response.text().await?;

        let parsed: DirectionsResponse =
            serde_json::from_str(&body).map_err(|e| RouteError::Json {
                message: e.to_string(),
                body: Some(truncate_body(&body)),
            })?;

        convert_directions(parsed)
    }
}

impl RouteProvider for DirectionsClient {
    async fn compute_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        waypoints: &[Coordinate],
    ) -> Result<Route, RouteError> {
        self.get_route(origin, destination, waypoints).await
    }
}

/// Pipe-separated stopover list, or `None` when there are no waypoints.
///
/// Plain coordinates are stopovers; the `optimize:true` prefix is never
/// added, so the order given is the order visited.
fn waypoints_param(waypoints: &[Coordinate]) -> Option<String> {
    if waypoints.is_empty() {
        return None;
    }

    Some(
        waypoints
            .iter()
            .map(Coordinate::to_string)
            .collect::<Vec<_>>()
            .join("|"),
    )
}

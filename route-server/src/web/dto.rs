//! Data transfer objects for the itinerary API.

use chrono::SecondsFormat;
use serde::Serialize;

use crate::domain::{Coordinate, Itinerary};
use crate::refresh::RefreshState;

/// How the current position is labeled at the start of the first leg.
pub const ORIGIN_LABEL: &str = "Your Location";

/// Snapshot of the refresh state, as served by `/api/itinerary`.
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryResponse {
    /// Scheduler phase (e.g. "ready", "awaiting_origin")
    pub phase: String,

    /// Whether origin and directions client are both available
    pub ready: bool,

    /// Startup failure that keeps the itinerary from ever loading
    pub error: Option<String>,

    /// Why the latest refresh failed, if it did
    pub last_cycle_error: Option<String>,

    pub origin: Option<Coordinate>,
    pub origin_name: Option<String>,

    /// When the shown itinerary was committed (RFC 3339)
    pub committed_at: Option<String>,

    /// Route summary from the directions provider
    pub summary: Option<String>,

    /// Encoded overview polyline for drawing the route
    pub polyline: Option<String>,

    pub warnings: Vec<String>,
    pub total_distance_meters: u64,
    pub total_duration_secs: u64,
    pub legs: Vec<LegResult>,
}

/// One leg of the itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegResult {
    /// Where the leg starts: the origin label or the previous stop's name
    pub from: String,

    /// Display name of the stop the leg ends at
    pub to: String,

    pub stop_name: String,
    pub order: u32,

    /// Provider-formatted distance (e.g. "5 km")
    pub distance: String,

    /// Provider-formatted duration (e.g. "10 mins")
    pub eta: String,

    pub distance_meters: u64,
    pub duration_secs: u64,
}

impl ItineraryResponse {
    pub fn from_state(state: &RefreshState) -> Self {
        let legs = state
            .last_itinerary
            .as_ref()
            .map(LegResult::from_itinerary)
            .unwrap_or_default();

        let (total_distance_meters, total_duration_secs) = state
            .last_itinerary
            .as_ref()
            .map(|it| (it.total_distance_meters(), it.total_duration_secs()))
            .unwrap_or_default();

        Self {
            phase: state.phase.as_str().to_string(),
            ready: state.phase.is_ready(),
            error: state.startup_error.as_ref().map(|e| e.to_string()),
            last_cycle_error: state.last_cycle_error.clone(),
            origin: state.origin,
            origin_name: state
                .last_itinerary
                .as_ref()
                .and_then(|it| it.origin_name.clone()),
            committed_at: state
                .committed_at
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true)),
            summary: state.last_route.as_ref().map(|r| r.summary.clone()),
            polyline: state
                .last_route
                .as_ref()
                .and_then(|r| r.overview_polyline.clone()),
            warnings: state
                .last_route
                .as_ref()
                .map(|r| r.warnings.clone())
                .unwrap_or_default(),
            total_distance_meters,
            total_duration_secs,
            legs,
        }
    }

    /// Nothing has been committed yet.
    pub fn is_loading(&self) -> bool {
        self.error.is_none() && self.committed_at.is_none()
    }
}

impl LegResult {
    /// One entry per label, each starting where the previous one ended.
    pub fn from_itinerary(itinerary: &Itinerary) -> Vec<Self> {
        let mut from = origin_label(itinerary.origin_name.as_deref());

        itinerary
            .iter()
            .map(|label| LegResult {
                from: std::mem::replace(&mut from, label.display_name.clone()),
                to: label.display_name.clone(),
                stop_name: label.stop_name.clone(),
                order: label.order,
                distance: label.distance.clone(),
                eta: label.eta.clone(),
                distance_meters: label.distance_meters,
                duration_secs: label.duration_secs,
            })
            .collect()
    }
}

/// Label for the current position, with its address when known.
pub fn origin_label(origin_name: Option<&str>) -> String {
    match origin_name {
        Some(name) => format!("{ORIGIN_LABEL} ({name})"),
        None => ORIGIN_LABEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::{ResolvedStopLabel, Route, StopId};
    use crate::refresh::{Phase, StartupFailure, StartupStage};

    fn label(index: usize, address: &str, stop: &str, distance: &str, eta: &str) -> ResolvedStopLabel {
        ResolvedStopLabel {
            index,
            display_name: format!("{address} ({stop})"),
            stop_id: StopId(index as u32 + 1),
            stop_name: stop.to_string(),
            order: index as u32 + 1,
            distance: distance.to_string(),
            eta: eta.to_string(),
            distance_meters: 1000 * (index as u64 + 1),
            duration_secs: 60 * (index as u64 + 1),
            position: Coordinate::new(1.0, 1.0).unwrap(),
        }
    }

    fn itinerary(origin_name: Option<&str>) -> Itinerary {
        Itinerary {
            labels: vec![
                label(0, "KN 5 Rd", "Stop A", "5 km", "10 mins"),
                label(1, "KG 11 Ave", "Stop B", "3 km", "7 mins"),
            ],
            origin_name: origin_name.map(String::from),
        }
    }

    #[test]
    fn legs_chain_from_origin() {
        let legs = LegResult::from_itinerary(&itinerary(None));

        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].from, "Your Location");
        assert_eq!(legs[0].to, "KN 5 Rd (Stop A)");
        assert_eq!(legs[0].distance, "5 km");
        assert_eq!(legs[0].eta, "10 mins");
        assert_eq!(legs[1].from, "KN 5 Rd (Stop A)");
        assert_eq!(legs[1].to, "KG 11 Ave (Stop B)");
        assert_eq!(legs[1].eta, "7 mins");
    }

    #[test]
    fn origin_name_suffixes_first_leg() {
        let legs = LegResult::from_itinerary(&itinerary(Some("Kigali Heights")));
        assert_eq!(legs[0].from, "Your Location (Kigali Heights)");
        assert_eq!(legs[1].from, "KN 5 Rd (Stop A)");
    }

    #[test]
    fn empty_state() {
        let response = ItineraryResponse::from_state(&RefreshState::new());

        assert_eq!(response.phase, "uninitialized");
        assert!(!response.ready);
        assert!(response.legs.is_empty());
        assert!(response.is_loading());
        assert_eq!(response.total_distance_meters, 0);
    }

    #[test]
    fn startup_error_surfaces() {
        let state = RefreshState {
            phase: Phase::AwaitingOrigin,
            startup_error: Some(StartupFailure::new(
                StartupStage::Geolocation,
                &"permission denied",
            )),
            ..RefreshState::new()
        };

        let response = ItineraryResponse::from_state(&state);
        assert_eq!(
            response.error.as_deref(),
            Some("could not determine location: permission denied")
        );
        assert!(!response.is_loading());
    }

    #[test]
    fn committed_state() {
        let state = RefreshState {
            phase: Phase::Ready,
            origin: Some(Coordinate::new(0.0, 0.0).unwrap()),
            directions_client_ready: true,
            last_itinerary: Some(itinerary(Some("Home"))),
            last_route: Some(Route {
                legs: vec![],
                summary: "KN 3 Rd".into(),
                overview_polyline: Some("abc".into()),
                warnings: vec!["Tolls".into()],
            }),
            committed_generation: 3,
            committed_at: Some(Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()),
            ..RefreshState::new()
        };

        let response = ItineraryResponse::from_state(&state);
        assert_eq!(response.phase, "ready");
        assert!(response.ready);
        assert_eq!(response.origin_name.as_deref(), Some("Home"));
        assert_eq!(response.committed_at.as_deref(), Some("2024-03-15T10:00:00Z"));
        assert_eq!(response.summary.as_deref(), Some("KN 3 Rd"));
        assert_eq!(response.polyline.as_deref(), Some("abc"));
        assert_eq!(response.warnings, vec!["Tolls".to_string()]);
        assert_eq!(response.total_distance_meters, 3000);
        assert_eq!(response.total_duration_secs, 180);
        assert_eq!(response.legs.len(), 2);
    }

    #[test]
    fn serializes_leg_fields() {
        let legs = LegResult::from_itinerary(&itinerary(None));
        let json = serde_json::to_value(&legs[0]).unwrap();

        assert_eq!(json["from"], "Your Location");
        assert_eq!(json["stop_name"], "Stop A");
        assert_eq!(json["order"], 1);
        assert_eq!(json["distance_meters"], 1000);
    }
}

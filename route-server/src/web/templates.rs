//! Askama templates for the web frontend.

use std::time::Duration;

use askama::Template;

use super::dto::{ItineraryResponse, LegResult};

/// The itinerary page.
#[derive(Template)]
#[template(path = "itinerary.html")]
pub struct ItineraryTemplate {
    pub phase: String,
    pub error: Option<String>,
    pub last_cycle_error: Option<String>,
    pub loading: bool,
    pub updated: Option<String>,
    pub summary: Option<String>,
    pub legs: Vec<LegResult>,
    pub total_distance: String,
    pub total_duration: String,
    pub warnings: Vec<String>,

    /// Seconds between automatic page reloads
    pub reload_secs: u64,
}

impl ItineraryTemplate {
    pub fn new(view: ItineraryResponse, refresh_interval: Duration) -> Self {
        Self {
            loading: view.is_loading(),
            phase: view.phase,
            error: view.error,
            last_cycle_error: view.last_cycle_error,
            updated: view.committed_at,
            summary: view.summary,
            total_distance: format_distance(view.total_distance_meters),
            total_duration: format_duration(view.total_duration_secs),
            legs: view.legs,
            warnings: view.warnings,
            reload_secs: refresh_interval.as_secs().max(1),
        }
    }
}

/// Format meters for display (e.g. "850 m", "12.3 km").
pub fn format_distance(meters: u64) -> String {
    if meters < 1000 {
        format!("{meters} m")
    } else {
        format!("{:.1} km", meters as f64 / 1000.0)
    }
}

/// Format seconds for display (e.g. "7 min", "1 h 5 min").
pub fn format_duration(secs: u64) -> String {
    let mins = (secs + 30) / 60;
    if mins < 60 {
        format!("{mins} min")
    } else {
        format!("{} h {} min", mins / 60, mins % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refresh::{Phase, RefreshState, StartupFailure, StartupStage};

    #[test]
    fn distance_format() {
        assert_eq!(format_distance(0), "0 m");
        assert_eq!(format_distance(850), "850 m");
        assert_eq!(format_distance(12_340), "12.3 km");
    }

    #[test]
    fn duration_format() {
        assert_eq!(format_duration(0), "0 min");
        assert_eq!(format_duration(420), "7 min");
        assert_eq!(format_duration(3900), "1 h 5 min");
    }

    #[test]
    fn renders_error_indicator() {
        let state = RefreshState {
            phase: Phase::AwaitingOrigin,
            startup_error: Some(StartupFailure::new(StartupStage::Geolocation, &"denied")),
            ..RefreshState::new()
        };
        let template = ItineraryTemplate::new(
            ItineraryResponse::from_state(&state),
            Duration::from_secs(30),
        );

        let html = template.render().unwrap();
        assert!(html.contains("could not determine location: denied"));
        assert!(html.contains(r#"content="30""#));
    }

    #[test]
    fn renders_loading() {
        let template = ItineraryTemplate::new(
            ItineraryResponse::from_state(&RefreshState::new()),
            Duration::from_secs(15),
        );

        let html = template.render().unwrap();
        assert!(html.contains("Loading itinerary"));
    }
}

//! Labeled itinerary types.

use serde::Serialize;

use super::{Coordinate, StopId};

/// A leg enriched with a geocoded name and its stop's business name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedStopLabel {
    /// Position in the itinerary, equal to the leg index.
    pub index: usize,

    /// `"<geocoded address> (<stop name>)"`.
    pub display_name: String,

    pub stop_id: StopId,
    pub stop_name: String,

    /// The stop's `order`; strictly increasing along the itinerary.
    pub order: u32,

    /// Provider-formatted distance of the leg ending at this stop.
    pub distance: String,

    /// Provider-formatted travel time of the leg ending at this stop.
    pub eta: String,

    pub distance_meters: u64,
    pub duration_secs: u64,

    /// Where the leg ends, as routed by the provider.
    pub position: Coordinate,
}

/// The ordered, labeled summary of one refresh cycle.
///
/// Labels are ordered by stop `order` ascending with no gaps or
/// duplicates: one label per stop, since the origin is not a stop.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Itinerary {
    pub labels: Vec<ResolvedStopLabel>,

    /// Geocoded name of the current position, if it was resolved.
    pub origin_name: Option<String>,
}

impl Itinerary {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedStopLabel> {
        self.labels.iter()
    }

    pub fn total_distance_meters(&self) -> u64 {
        self.labels.iter().map(|l| l.distance_meters).sum()
    }

    pub fn total_duration_secs(&self) -> u64 {
        self.labels.iter().map(|l| l.duration_secs).sum()
    }

    /// Check that labels are index-aligned and strictly ordered.
    pub fn is_well_ordered(&self) -> bool {
        self.labels.iter().enumerate().all(|(i, l)| l.index == i)
            && self.labels.windows(2).all(|w| w[0].order < w[1].order)
    }
}

/// Build the display name shown for a stop.
pub fn display_name(address: &str, stop_name: &str) -> String {
    format!("{address} ({stop_name})")
}

//! Refresh state shared with the presentation layer.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Coordinate, Itinerary, Route};
use crate::itinerary::CycleOutput;

/// Lifecycle phase of the refresh scheduler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Not started yet.
    #[default]
    Uninitialized,
    /// Waiting for the one-shot origin lookup (or stuck after it failed).
    AwaitingOrigin,
    /// Origin known; waiting for the directions client.
    AwaitingClient,
    /// Idle between cycles.
    Ready,
    /// A cycle is in flight.
    Refreshing,
    /// Shut down; nothing further is committed.
    Stopped,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Uninitialized => "uninitialized",
            Phase::AwaitingOrigin => "awaiting_origin",
            Phase::AwaitingClient => "awaiting_client",
            Phase::Ready => "ready",
            Phase::Refreshing => "refreshing",
            Phase::Stopped => "stopped",
        }
    }

    /// Origin and directions client are both available.
    pub fn is_ready(&self) -> bool {
        matches!(self, Phase::Ready | Phase::Refreshing)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which startup step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StartupStage {
    Geolocation,
    ClientInit,
}

/// A persistent startup failure. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartupFailure {
    pub stage: StartupStage,
    pub message: String,
}

impl StartupFailure {
    pub fn new(stage: StartupStage, error: &impl fmt::Display) -> Self {
        Self {
            stage,
            message: error.to_string(),
        }
    }
}

impl fmt::Display for StartupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stage {
            StartupStage::Geolocation => write!(f, "could not determine location: {}", self.message),
            StartupStage::ClientInit => {
                write!(f, "directions service unavailable: {}", self.message)
            }
        }
    }
}

/// Result of offering a cycle's output for commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Commit {
    Applied,
    /// A later-started cycle already committed.
    Superseded,
    /// The scheduler has stopped.
    Stopped,
}

/// Everything the presentation layer may read.
///
/// Written only by the scheduler; readers get cloned snapshots.
/// `last_itinerary` and `last_route` are always replaced together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshState {
    pub phase: Phase,
    pub origin: Option<Coordinate>,
    pub directions_client_ready: bool,
    pub last_itinerary: Option<Itinerary>,
    pub last_route: Option<Route>,

    /// Generation of the cycle that produced `last_itinerary`; 0 if none.
    pub committed_generation: u64,
    pub committed_at: Option<DateTime<Utc>>,

    pub startup_error: Option<StartupFailure>,

    /// Why the most recent cycle failed, cleared by the next commit.
    pub last_cycle_error: Option<String>,
}

impl RefreshState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a completed cycle's output.
    ///
    /// Applied only if the scheduler is running and no cycle that started
    /// later has committed yet. Itinerary and route are swapped in together.
    pub(crate) fn commit(
        &mut self,
        generation: u64,
        output: CycleOutput,
        at: DateTime<Utc>,
    ) -> Commit {
        if self.phase == Phase::Stopped {
            return Commit::Stopped;
        }
        if generation <= self.committed_generation {
            return Commit::Superseded;
        }

        self.last_itinerary = Some(output.itinerary);
        self.last_route = output.route;
        self.committed_generation = generation;
        self.committed_at = Some(at);
        self.last_cycle_error = None;

        Commit::Applied
    }

    /// Note a failed cycle for diagnostics.
    ///
    /// Ignored when stale or stopped. Never touches the itinerary.
    pub(crate) fn record_failure(&mut self, generation: u64, message: String) -> bool {
        if self.phase == Phase::Stopped || generation <= self.committed_generation {
            return false;
        }
        self.last_cycle_error = Some(message);
        true
    }
}

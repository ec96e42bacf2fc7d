//! Stub providers for tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use crate::directions::RouteError;
use crate::domain::{Coordinate, Leg, Route};
use crate::geocoding::GeocodeError;

use super::provider::{NameResolver, RouteProvider};

pub(crate) fn at(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).unwrap()
}

pub(crate) fn leg(start: Coordinate, end: Coordinate, distance: &str, duration: &str) -> Leg {
    Leg {
        start,
        end,
        distance_text: distance.to_string(),
        duration_text: duration.to_string(),
        distance_meters: 1000,
        duration_secs: 60,
    }
}

/// A recorded route request.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RouteRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub waypoints: Vec<Coordinate>,
}

/// What the stub answers with.
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    /// Route straight through the requested points. Leg `i` is
    /// `"{i+1} km"` long and takes `"{call} mins"`, where `call` is the
    /// 1-based request number, so results from different calls differ.
    Echo,
    Route(Route),
    Status(&'static str),
}

/// Scripted route provider.
pub(crate) struct StubDirections {
    replies: Mutex<VecDeque<Reply>>,
    fallback: Reply,
    delays: Mutex<VecDeque<Duration>>,
    default_delay: Duration,
    requests: Mutex<Vec<RouteRequest>>,
}

impl StubDirections {
    fn with_fallback(fallback: Reply) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback,
            delays: Mutex::new(VecDeque::new()),
            default_delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn echo() -> Self {
        Self::with_fallback(Reply::Echo)
    }

    pub fn returning(route: Route) -> Self {
        Self::with_fallback(Reply::Route(route))
    }

    pub fn failing(status: &'static str) -> Self {
        Self::with_fallback(Reply::Status(status))
    }

    /// Answer the next unscripted call with `reply`, before the fallback.
    pub fn then(self, reply: Reply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    /// Delay every call by `delay` unless a per-call delay is queued.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    /// Delay the next call by `delay`.
    pub fn then_delay(self, delay: Duration) -> Self {
        self.delays.lock().unwrap().push_back(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RouteRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl RouteProvider for StubDirections {
    async fn compute_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        waypoints: &[Coordinate],
    ) -> Result<Route, RouteError> {
        let (call, reply, delay) = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(RouteRequest {
                origin,
                destination,
                waypoints: waypoints.to_vec(),
            });
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| self.fallback.clone());
            let delay = self
                .delays
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(self.default_delay);
            (requests.len(), reply, delay)
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match reply {
            Reply::Echo => {
                let mut points = vec![origin];
                points.extend_from_slice(waypoints);
                points.push(destination);

                let legs = points
                    .windows(2)
                    .enumerate()
                    .map(|(i, w)| {
                        leg(w[0], w[1], &format!("{} km", i + 1), &format!("{call} mins"))
                    })
                    .collect();

                Ok(Route {
                    legs,
                    summary: format!("call {call}"),
                    overview_polyline: Some(format!("poly{call}")),
                    warnings: vec![],
                })
            }
            Reply::Route(route) => Ok(route),
            Reply::Status(status) => Err(RouteError::Status {
                status: status.to_string(),
                message: None,
            }),
        }
    }
}

/// Name resolver answering from a table.
///
/// Unknown coordinates resolve to `"Near {lat},{lng}"` unless marked as
/// failing.
#[derive(Default)]
pub(crate) struct StubGeocoder {
    names: HashMap<String, String>,
    failing: HashSet<String>,
    fail_all: bool,
    delay: Duration,
    calls: Mutex<Vec<Coordinate>>,
}

impl StubGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, at: Coordinate, name: &str) -> Self {
        self.names.insert(at.to_string(), name.to_string());
        self
    }

    pub fn failing_at(mut self, at: Coordinate) -> Self {
        self.failing.insert(at.to_string());
        self
    }

    pub fn failing_everywhere(mut self) -> Self {
        self.fail_all = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<Coordinate> {
        self.calls.lock().unwrap().clone()
    }
}

impl NameResolver for StubGeocoder {
    async fn resolve_name(&self, at: Coordinate) -> Result<String, GeocodeError> {
        self.calls.lock().unwrap().push(at);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let key = at.to_string();
        if self.fail_all || self.failing.contains(&key) {
            return Err(GeocodeError::NoResults(at));
        }

        Ok(self
            .names
            .get(&key)
            .cloned()
            .unwrap_or_else(|| format!("Near {key}")))
    }
}

//! Periodic itinerary refresh.
//!
//! The scheduler owns the startup sequence (origin, then directions client)
//! and a wall-clock timer that starts one refresh cycle per tick. Cycles run
//! in their own tasks. Every cycle takes a generation number when it starts,
//! and its result is only committed if nothing newer has been committed and
//! the scheduler is still running.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::domain::{Coordinate, Stop};
use crate::geolocation::LocationProvider;
use crate::itinerary::{Aggregator, CycleError, NameResolver, RouteProvider};
use crate::maps::ClientInitError;
use crate::stops::StopRegistry;

use super::config::RefreshConfig;
use super::state::{Commit, Phase, RefreshState, StartupFailure, StartupStage};

/// What happened to one refresh cycle.
#[derive(Debug)]
pub enum CycleOutcome {
    /// The itinerary was published.
    Committed { generation: u64, legs: usize },
    /// A cycle that started later had already committed.
    Superseded { generation: u64 },
    /// The scheduler stopped before the cycle finished.
    Discarded,
    /// The cycle failed; the previous itinerary is kept.
    Failed(CycleError),
    /// Origin or directions client not available yet.
    NotReady,
}

/// Counts cycles in flight.
struct CycleGuard(Option<Arc<AtomicUsize>>);

impl CycleGuard {
    /// Enter only if no other cycle is running.
    fn try_exclusive(running: &Arc<AtomicUsize>) -> Option<Self> {
        running
            .compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Some(Arc::clone(running))))
    }

    fn enter(running: &Arc<AtomicUsize>) -> Self {
        running.fetch_add(1, Ordering::AcqRel);
        Self(Some(Arc::clone(running)))
    }

    /// Leave, returning how many cycles are still running.
    fn release(mut self) -> usize {
        match self.0.take() {
            Some(running) => running.fetch_sub(1, Ordering::AcqRel) - 1,
            None => 0,
        }
    }
}

impl Drop for CycleGuard {
    fn drop(&mut self) {
        if let Some(running) = self.0.take() {
            running.fetch_sub(1, Ordering::AcqRel);
        }
    }
}

/// Leave a cycle and drop back to `Ready` if it was the last one.
fn settle(state: &mut RefreshState, guard: CycleGuard) -> bool {
    if guard.release() == 0 && state.phase == Phase::Refreshing {
        state.phase = Phase::Ready;
        true
    } else {
        false
    }
}

#[derive(Default)]
struct Tasks {
    init: Option<JoinHandle<()>>,
    timer: Option<JoinHandle<()>>,
}

struct Inner<R, G> {
    registry: StopRegistry,
    geocoder: G,
    directions: OnceLock<R>,
    config: RefreshConfig,
    state: watch::Sender<RefreshState>,
    generation: AtomicU64,
    running: Arc<AtomicUsize>,
    tasks: Mutex<Tasks>,
}

/// Drives periodic itinerary refreshes and publishes the results.
///
/// Cheap to clone; clones share the same state. Call [`shutdown`] to stop
/// the timer, otherwise it runs for the life of the runtime.
///
/// [`shutdown`]: RefreshScheduler::shutdown
pub struct RefreshScheduler<R, G> {
    inner: Arc<Inner<R, G>>,
}

impl<R, G> Clone for RefreshScheduler<R, G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R, G> RefreshScheduler<R, G>
where
    R: RouteProvider + 'static,
    G: NameResolver + 'static,
{
    pub fn new(registry: StopRegistry, geocoder: G, config: RefreshConfig) -> Self {
        let (state, _) = watch::channel(RefreshState::new());
        Self {
            inner: Arc::new(Inner {
                registry,
                geocoder,
                directions: OnceLock::new(),
                config,
                state,
                generation: AtomicU64::new(0),
                running: Arc::new(AtomicUsize::new(0)),
                tasks: Mutex::new(Tasks::default()),
            }),
        }
    }

    /// Begin startup in the background.
    ///
    /// Requests the origin once from `locator`, then builds the directions
    /// client with `init_client`. Neither step is retried: a failure is
    /// recorded in [`RefreshState::startup_error`] and the scheduler stays
    /// in the phase it reached. Once both succeed the timer starts.
    ///
    /// Only the first call has any effect.
    pub fn start<L, F>(&self, locator: L, init_client: F)
    where
        L: LocationProvider + 'static,
        F: FnOnce() -> Result<R, ClientInitError> + Send + 'static,
    {
        let mut tasks = self.inner.lock_tasks();

        let started = self.inner.state.send_if_modified(|state| {
            if state.phase != Phase::Uninitialized {
                return false;
            }
            state.phase = Phase::AwaitingOrigin;
            true
        });
        if !started {
            warn!(phase = %self.phase(), "Refresh scheduler already started");
            return;
        }

        let inner = Arc::clone(&self.inner);
        tasks.init = Some(tokio::spawn(inner.initialise(locator, init_client)));
    }

    /// Run one cycle now, regardless of whether another is in flight.
    ///
    /// The result still goes through the generation check, so a cycle
    /// overtaken by a later one is reported as superseded.
    pub async fn refresh_now(&self) -> CycleOutcome {
        let guard = CycleGuard::enter(&self.inner.running);
        self.inner.run_cycle(guard).await
    }

    /// Stop the timer and any unfinished startup.
    ///
    /// Cycles already in flight are left to finish, but nothing they
    /// produce is committed.
    pub fn shutdown(&self) {
        let mut tasks = self.inner.lock_tasks();
        if let Some(timer) = tasks.timer.take() {
            timer.abort();
        }
        if let Some(init) = tasks.init.take() {
            init.abort();
        }

        let stopped = self.inner.state.send_if_modified(|state| {
            if state.phase == Phase::Stopped {
                return false;
            }
            state.phase = Phase::Stopped;
            true
        });
        if stopped {
            info!("Refresh scheduler stopped");
        }
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> RefreshState {
        self.inner.state.borrow().clone()
    }

    /// Watch the state for changes.
    pub fn subscribe(&self) -> watch::Receiver<RefreshState> {
        self.inner.state.subscribe()
    }

    pub fn phase(&self) -> Phase {
        self.inner.state.borrow().phase
    }

    pub fn stops(&self) -> &[Stop] {
        self.inner.registry.list_stops()
    }

    pub fn interval(&self) -> Duration {
        self.inner.config.period()
    }
}

impl<R, G> Inner<R, G>
where
    R: RouteProvider + 'static,
    G: NameResolver + 'static,
{
    fn lock_tasks(&self) -> MutexGuard<'_, Tasks> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn initialise<L, F>(self: Arc<Self>, locator: L, init_client: F)
    where
        L: LocationProvider,
        F: FnOnce() -> Result<R, ClientInitError>,
    {
        debug!("Requesting origin");
        let origin = match locator.locate().await {
            Ok(origin) => origin,
            Err(e) => {
                error!(error = %e, "Could not determine origin, refresh disabled");
                self.record_startup_failure(StartupFailure::new(StartupStage::Geolocation, &e));
                return;
            }
        };
        info!(%origin, "Origin acquired");

        let proceed = self.state.send_if_modified(|state| {
            if state.phase == Phase::Stopped {
                return false;
            }
            state.origin = Some(origin);
            state.phase = Phase::AwaitingClient;
            true
        });
        if !proceed {
            return;
        }

        let client = match init_client() {
            Ok(client) => client,
            Err(e) => {
                error!(error = %e, "Could not create directions client, refresh disabled");
                self.record_startup_failure(StartupFailure::new(StartupStage::ClientInit, &e));
                return;
            }
        };
        if self.directions.set(client).is_err() {
            warn!("Directions client already initialised");
        }

        self.become_ready();
    }

    fn record_startup_failure(&self, failure: StartupFailure) {
        self.state.send_if_modified(|state| {
            if state.phase == Phase::Stopped {
                return false;
            }
            state.startup_error = Some(failure);
            true
        });
    }

    /// Move to `Ready` and start the timer, unless shutdown got there first.
    fn become_ready(self: &Arc<Self>) {
        let mut tasks = self.lock_tasks();

        let ready = self.state.send_if_modified(|state| {
            if state.phase == Phase::Stopped {
                return false;
            }
            state.directions_client_ready = true;
            state.phase = Phase::Ready;
            true
        });
        if !ready {
            return;
        }

        info!(
            interval = ?self.config.period(),
            stops = self.registry.len(),
            "Refresh scheduler ready"
        );
        tasks.timer = Some(tokio::spawn(Arc::clone(self).run_timer()));
    }

    async fn run_timer(self: Arc<Self>) {
        let period = self.config.period();
        let first = if self.config.first_tick_immediate {
            Instant::now()
        } else {
            Instant::now() + period
        };

        let mut ticks = tokio::time::interval_at(first, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticks.tick().await;

            let Some(guard) = CycleGuard::try_exclusive(&self.running) else {
                debug!("Previous refresh still in flight, skipping tick");
                continue;
            };

            let inner = Arc::clone(&self);
            tokio::spawn(async move {
                inner.run_cycle(guard).await;
            });
        }
    }

    /// Origin and client, if both are available and we are not stopped.
    fn cycle_inputs(&self) -> Option<(Coordinate, &R)> {
        let state = self.state.borrow();
        if !state.phase.is_ready() {
            return None;
        }
        Some((state.origin?, self.directions.get()?))
    }

    async fn run_cycle(&self, guard: CycleGuard) -> CycleOutcome {
        let Some((origin, directions)) = self.cycle_inputs() else {
            let phase = self.state.borrow().phase;
            self.state.send_if_modified(|state| settle(state, guard));
            return if phase == Phase::Stopped {
                CycleOutcome::Discarded
            } else {
                CycleOutcome::NotReady
            };
        };

        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.state.send_if_modified(|state| {
            if state.phase != Phase::Ready {
                return false;
            }
            state.phase = Phase::Refreshing;
            true
        });
        debug!(generation, "Refresh cycle started");

        let aggregator = Aggregator::new(directions, &self.geocoder, &self.config.aggregator);
        let result = aggregator.run(origin, self.registry.list_stops()).await;

        match result {
            Ok(output) => {
                let legs = output.itinerary.len();
                let mut commit = Commit::Stopped;
                self.state.send_if_modified(|state| {
                    commit = state.commit(generation, output, Utc::now());
                    let settled = settle(state, guard);
                    commit == Commit::Applied || settled
                });

                match commit {
                    Commit::Applied => {
                        info!(generation, legs, "Itinerary updated");
                        CycleOutcome::Committed { generation, legs }
                    }
                    Commit::Superseded => {
                        debug!(generation, "Newer itinerary already committed, dropping result");
                        CycleOutcome::Superseded { generation }
                    }
                    Commit::Stopped => {
                        debug!(generation, "Scheduler stopped, dropping result");
                        CycleOutcome::Discarded
                    }
                }
            }
            Err(e) => {
                warn!(generation, error = %e, "Refresh cycle failed, keeping previous itinerary");
                let message = e.to_string();
                self.state.send_if_modified(|state| {
                    let recorded = state.record_failure(generation, message);
                    let settled = settle(state, guard);
                    recorded || settled
                });
                CycleOutcome::Failed(e)
            }
        }
    }
}

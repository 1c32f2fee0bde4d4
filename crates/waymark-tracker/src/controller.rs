//! Tracking controller
//!
//! Two-state machine driving the sample-and-report loop.
//!
//! While Active a single spawned task runs cycles back to back on a fixed
//! period. Cycles never overlap: when one outlasts the period the missed
//! ticks are skipped and the next cycle waits for the following boundary.
//! Stopping drops the task, so the timer and any cycle still in flight are
//! cancelled together. View updates from the loop are checked against the
//! run they belong to under the state lock, so nothing from a stopped run is
//! rendered once `stop()` has returned. Only the loop task reports to the
//! alert service; `locate()` samples and renders.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use smol::{Task, Timer};
use waymark_geo::{Coordinate, LocationSource};
use waymark_net::AlertService;

use crate::view::{START_LABEL, STOP_LABEL};
use crate::{DestinationStore, MapView, StatusBoard, TrackerConfig};

/// Tracking state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    Idle,
    Active,
}

enum Tracking {
    Idle,
    Active { run: u64, _timer: Task<()> },
}

struct LoopState {
    tracking: Tracking,
    runs: u64,
}

struct Inner<L, S, V> {
    config: TrackerConfig,
    source: L,
    service: Arc<S>,
    view: Arc<V>,
    store: DestinationStore<S, V>,
    state: Mutex<LoopState>,
    map_ready: AtomicBool,
}

/// Owns the tracking loop and the destination store.
///
/// Dropping the controller stops tracking.
pub struct TrackingController<L, S, V>
where
    L: LocationSource + 'static,
    S: AlertService + 'static,
    V: MapView + StatusBoard + 'static,
{
    inner: Arc<Inner<L, S, V>>,
}

impl<L, S, V> TrackingController<L, S, V>
where
    L: LocationSource + 'static,
    S: AlertService + 'static,
    V: MapView + StatusBoard + 'static,
{
    pub fn new(config: TrackerConfig, source: L, service: Arc<S>, view: Arc<V>) -> Self {
        let store = DestinationStore::new(service.clone(), view.clone(), config.default_radius);
        store.set_logging(config.verbose_logging);

        Self {
            inner: Arc::new(Inner {
                config,
                source,
                service,
                view,
                store,
                state: Mutex::new(LoopState {
                    tracking: Tracking::Idle,
                    runs: 0,
                }),
                map_ready: AtomicBool::new(false),
            }),
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.inner.config
    }

    pub fn destinations(&self) -> &DestinationStore<S, V> {
        &self.inner.store
    }

    pub fn state(&self) -> TrackingState {
        match self.inner.lock().tracking {
            Tracking::Idle => TrackingState::Idle,
            Tracking::Active { .. } => TrackingState::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state() == TrackingState::Active
    }

    /// Begin tracking. The first cycle runs right away.
    ///
    /// Returns `false` if tracking was already active.
    pub fn start(&self) -> bool {
        {
            let mut state = self.inner.lock();
            if let Tracking::Active { .. } = state.tracking {
                return false;
            }

            state.runs += 1;
            let run = state.runs;
            let inner = self.inner.clone();
            let timer = smol::spawn(async move { inner.run_loop(run).await });
            state.tracking = Tracking::Active { run, _timer: timer };
        }

        self.inner.view.set_tracking_label(STOP_LABEL);
        tracing::info!("Tracking started.");
        true
    }

    /// Stop tracking and cancel the timer.
    ///
    /// Returns `false` if tracking was already idle.
    pub fn stop(&self) -> bool {
        if !self.inner.halt() {
            return false;
        }
        self.inner.view.set_tracking_label(START_LABEL);
        tracing::info!("Tracking stopped.");
        true
    }

    /// Flip between Idle and Active, returning the new state
    pub fn toggle(&self) -> TrackingState {
        if self.is_active() {
            self.stop();
            TrackingState::Idle
        } else {
            self.start();
            TrackingState::Active
        }
    }

    /// Sample once now and update the map and status line.
    ///
    /// Never reports to the service; only the tracking loop does.
    pub async fn locate(&self) {
        let run = self.inner.active_run();
        self.inner.sample(run).await;
    }

    pub fn set_logging(&self, enabled: bool) {
        self.inner.store.set_logging(enabled);
        let status = if enabled { "enabled" } else { "disabled" };
        tracing::info!("Logging {}.", status);
    }
}

impl<L, S, V> Drop for TrackingController<L, S, V>
where
    L: LocationSource + 'static,
    S: AlertService + 'static,
    V: MapView + StatusBoard + 'static,
{
    fn drop(&mut self) {
        // the loop task holds an Arc to `inner`; cancel it so both are freed
        if self.inner.halt() {
            tracing::debug!("controller dropped while tracking");
        }
    }
}

impl<L, S, V> Inner<L, S, V>
where
    L: LocationSource + 'static,
    S: AlertService + 'static,
    V: MapView + StatusBoard + 'static,
{
    fn lock(&self) -> MutexGuard<'_, LoopState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Swap in Idle and cancel the loop task outside the lock.
    ///
    /// Returns whether a run was active.
    fn halt(&self) -> bool {
        let previous = std::mem::replace(&mut self.lock().tracking, Tracking::Idle);
        let was_active = matches!(previous, Tracking::Active { .. });
        drop(previous);
        was_active
    }

    fn active_run(&self) -> Option<u64> {
        match self.lock().tracking {
            Tracking::Active { run, .. } => Some(run),
            Tracking::Idle => None,
        }
    }

    /// Apply a view update.
    ///
    /// Updates tied to a run are dropped unless that run is still the active
    /// one; the lock is held while rendering so `stop()` cannot interleave.
    fn render(&self, run: Option<u64>, update: impl FnOnce(&V)) {
        match run {
            None => update(&self.view),
            Some(run) => {
                let state = self.lock();
                if matches!(state.tracking, Tracking::Active { run: current, .. } if current == run) {
                    update(&self.view);
                }
            }
        }
    }

    async fn run_loop(self: Arc<Self>, run: u64) {
        let period = self.config.interval();
        let mut deadline = Instant::now();

        loop {
            self.cycle(run).await;

            deadline += period;
            let now = Instant::now();
            if deadline <= now {
                let missed = (now - deadline).as_nanos() / period.as_nanos() + 1;
                deadline += period * missed as u32;
                tracing::debug!("cycle overran the interval, skipped {} tick(s)", missed);
            }
            Timer::at(deadline).await;
        }
    }

    async fn cycle(&self, run: u64) {
        if let Some(position) = self.sample(Some(run)).await {
            self.report(position, run).await;
        }
    }

    async fn sample(&self, run: Option<u64>) -> Option<Coordinate> {
        match self.source.current_location().await {
            Ok(position) => {
                self.render(run, |view| {
                    view.set_status(&format!(
                        "Latitude: {}, Longitude: {}",
                        position.latitude(),
                        position.longitude()
                    ));
                    self.place_marker(view, position);
                });
                Some(position)
            }
            Err(err) => {
                tracing::warn!("location unavailable: {}", err);
                self.render(run, |view| {
                    view.set_status(&format!("Error: {err}"));
                    if !self.map_ready.swap(true, Ordering::SeqCst) {
                        view.initialize(self.config.default_location);
                    }
                });
                None
            }
        }
    }

    fn place_marker(&self, view: &V, position: Coordinate) {
        if self.map_ready.swap(true, Ordering::SeqCst) {
            view.move_marker(position);
        } else {
            view.initialize(position);
        }
    }

    async fn report(&self, position: Coordinate, run: u64) {
        let radius = self.store.alert_radius();
        match self.service.report_location(position, radius).await {
            Ok(alert) => {
                if self.store.logging_enabled() {
                    tracing::info!("Location sent: {} {}", position.latitude(), position.longitude());
                } else {
                    tracing::debug!("Location sent: {} {}", position.latitude(), position.longitude());
                }
                self.render(Some(run), |view| view.set_alert(&alert));
            }
            Err(err) => tracing::warn!("location report failed: {}", err),
        }
    }
}

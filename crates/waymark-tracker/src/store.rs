//! Destination store
//!
//! Holds the single live destination and the process-wide alert radius.
//! Every change is pushed to the map immediately and to the alert service in
//! the background.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use smol::Task;
use smol::channel::{Receiver, Sender};
use waymark_geo::{AlertRadius, Coordinate, Destination, RadiusError};
use waymark_net::AlertService;

use crate::MapView;

#[derive(Debug)]
struct StoreState {
    destination: Option<Destination>,
    radius: AlertRadius,
}

/// Destination and alert radius owned by one user session.
///
/// Submissions reach the service one at a time, in the order they were made.
/// Dropping the store abandons any that are still queued.
pub struct DestinationStore<S, V> {
    state: Mutex<StoreState>,
    map: Arc<V>,
    verbose: Arc<AtomicBool>,
    outbox: Sender<Destination>,
    _worker: Task<()>,
    _service: PhantomData<fn() -> S>,
}

impl<S, V> DestinationStore<S, V>
where
    S: AlertService + 'static,
    V: MapView,
{
    pub fn new(service: Arc<S>, map: Arc<V>, radius: AlertRadius) -> Self {
        let verbose = Arc::new(AtomicBool::new(false));
        let (outbox, queued) = smol::channel::unbounded();
        let worker = smol::spawn(deliver(service, queued, verbose.clone()));

        Self {
            state: Mutex::new(StoreState {
                destination: None,
                radius,
            }),
            map,
            verbose,
            outbox,
            _worker: worker,
            _service: PhantomData,
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn alert_radius(&self) -> AlertRadius {
        self.lock().radius
    }

    pub fn destination(&self) -> Option<Destination> {
        self.lock().destination
    }

    /// Replace the destination with `coordinate` at the current radius.
    ///
    /// The service is told in the background; its answer is only logged.
    pub fn set_destination(&self, coordinate: Coordinate) -> Destination {
        let destination = {
            let mut state = self.lock();
            let destination = Destination::new(coordinate, state.radius);
            state.destination = Some(destination);
            self.enqueue(destination);
            destination
        };

        self.map.show_destination(&destination);
        destination
    }

    /// Dragging the destination marker lands here
    pub fn move_destination(&self, coordinate: Coordinate) -> Destination {
        tracing::debug!("destination moved to {}", coordinate);
        self.set_destination(coordinate)
    }

    /// Parse and apply user radius input.
    ///
    /// Invalid input leaves the stored radius untouched.
    pub fn set_alert_radius(&self, input: &str) -> Result<AlertRadius, RadiusError> {
        let radius: AlertRadius = input.parse().inspect_err(|e| {
            tracing::warn!("rejected alert radius: {}", e);
        })?;
        self.apply_alert_radius(radius);
        Ok(radius)
    }

    /// Store `radius`; an existing destination is re-issued so the circle and
    /// the service agree on it.
    pub fn apply_alert_radius(&self, radius: AlertRadius) {
        let reissued = {
            let mut state = self.lock();
            state.radius = radius;
            state.destination = state.destination.map(|d| d.with_radius(radius));
            if let Some(destination) = state.destination {
                self.enqueue(destination);
            }
            state.destination
        };
        tracing::info!("alert radius set to {}", radius);

        if let Some(destination) = reissued {
            self.map.show_destination(&destination);
        }
    }

    /// Forget the destination locally; the service keeps its last value
    pub fn clear_destination(&self) -> Option<Destination> {
        let previous = self.lock().destination.take();
        if previous.is_some() {
            self.map.clear_destination();
        }
        previous
    }

    pub fn set_logging(&self, enabled: bool) {
        self.verbose.store(enabled, Ordering::Relaxed);
    }

    pub fn logging_enabled(&self) -> bool {
        self.verbose.load(Ordering::Relaxed)
    }

    /// Queue a submission; called with the state lock held so queue order
    /// matches the order of state changes.
    fn enqueue(&self, destination: Destination) {
        if self.outbox.try_send(destination).is_err() {
            tracing::warn!("destination queue closed, {} not sent", destination.coordinate);
        }
    }
}

/// Submit queued destinations one after another until the store goes away
async fn deliver<S: AlertService>(service: Arc<S>, queued: Receiver<Destination>, verbose: Arc<AtomicBool>) {
    while let Ok(destination) = queued.recv().await {
        match service.submit_destination(destination).await {
            Ok(status) if verbose.load(Ordering::Relaxed) => tracing::info!("Destination set: {}", status),
            Ok(status) => tracing::debug!("Destination set: {}", status),
            Err(err) => tracing::warn!("destination update failed: {}", err),
        }
    }
}

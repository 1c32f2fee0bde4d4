//! Test doubles for the tracker seams.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use smol::Timer;
use smol::channel::{Receiver, Sender};
use waymark_geo::{AlertRadius, Coordinate, Destination};
use waymark_net::{AlertService, NetError};
use waymark_tracker::{MapView, StatusBoard};

pub fn coord(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).unwrap()
}

/// Poll `pred` until it holds or `timeout` passes
pub fn wait_until(timeout: Duration, mut pred: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if pred() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    pred()
}

// ============================================================================
// SERVICE
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Destination(Destination),
    Location(Coordinate, AlertRadius),
    Radius(AlertRadius),
    Status,
}

pub struct RecordingService {
    calls: Mutex<Vec<Call>>,
    tx: Sender<Call>,
    rx: Receiver<Call>,
    alert: String,
    fail: AtomicBool,
    delay: Duration,
    first_delay: Mutex<Option<Duration>>,
    completed: Mutex<Vec<Call>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RecordingService {
    pub fn new() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    /// Every call takes `delay` before answering
    pub fn with_delay(delay: Duration) -> Self {
        let (tx, rx) = smol::channel::unbounded();
        Self {
            calls: Mutex::new(Vec::new()),
            tx,
            rx,
            alert: "Keep going!".into(),
            fail: AtomicBool::new(false),
            delay,
            first_delay: Mutex::new(None),
            completed: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Only the first call takes `delay`; the rest answer at once
    pub fn with_first_delay(delay: Duration) -> Self {
        let svc = Self::new();
        *svc.first_delay.lock().unwrap() = Some(delay);
        svc
    }

    pub fn failing() -> Self {
        let svc = Self::new();
        svc.fail.store(true, Ordering::SeqCst);
        svc
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn location_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Location(..)))
            .count()
    }

    pub fn destination_calls(&self) -> Vec<Destination> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Destination(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    /// Destination the service holds once every answered submission applied
    pub fn applied_destination(&self) -> Option<Destination> {
        self.completed
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|c| match c {
                Call::Destination(d) => Some(*d),
                _ => None,
            })
    }

    pub fn completed_calls(&self) -> usize {
        self.completed.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Next recorded call, or `None` after `timeout`
    pub fn next_call(&self, timeout: Duration) -> Option<Call> {
        smol::block_on(smol::future::or(
            async { self.rx.recv().await.ok() },
            async {
                Timer::after(timeout).await;
                None
            },
        ))
    }

    async fn answer(&self, call: Call, reply: &str) -> Result<String, NetError> {
        self.calls.lock().unwrap().push(call.clone());
        let _ = self.tx.try_send(call.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let delay = self.first_delay.lock().unwrap().take().unwrap_or(self.delay);
        if !delay.is_zero() {
            Timer::after(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completed.lock().unwrap().push(call);

        if self.fail.load(Ordering::SeqCst) {
            Err(NetError::Network("connection refused".into()))
        } else {
            Ok(reply.to_string())
        }
    }
}

impl AlertService for RecordingService {
    async fn submit_destination(&self, destination: Destination) -> Result<String, NetError> {
        self.answer(Call::Destination(destination), "Destination set").await
    }

    async fn report_location(&self, position: Coordinate, radius: AlertRadius) -> Result<String, NetError> {
        let alert = self.alert.clone();
        self.answer(Call::Location(position, radius), &alert).await
    }

    async fn update_radius(&self, radius: AlertRadius) -> Result<String, NetError> {
        self.answer(Call::Radius(radius), "Alert radius updated").await
    }

    async fn status(&self) -> Result<String, NetError> {
        self.answer(Call::Status, "Server is running").await
    }
}

// ============================================================================
// VIEW
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Initialize(Coordinate),
    MoveMarker(Coordinate),
    ShowDestination(Destination),
    ClearDestination,
    Status(String),
    Alert(String),
    Label(String),
}

#[derive(Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Alert(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Label(l) => Some(l),
                _ => None,
            })
            .collect()
    }
}

impl MapView for RecordingView {
    fn initialize(&self, center: Coordinate) {
        self.push(ViewEvent::Initialize(center));
    }

    fn move_marker(&self, position: Coordinate) {
        self.push(ViewEvent::MoveMarker(position));
    }

    fn show_destination(&self, destination: &Destination) {
        self.push(ViewEvent::ShowDestination(*destination));
    }

    fn clear_destination(&self) {
        self.push(ViewEvent::ClearDestination);
    }
}

impl StatusBoard for RecordingView {
    fn set_status(&self, text: &str) {
        self.push(ViewEvent::Status(text.to_string()));
    }

    fn set_alert(&self, text: &str) {
        self.push(ViewEvent::Alert(text.to_string()));
    }

    fn set_tracking_label(&self, label: &str) {
        self.push(ViewEvent::Label(label.to_string()));
    }
}

//! In-process alert service
//!
//! Answers the alert protocol without a network hop. Useful for offline runs
//! and as a reference for what the remote service says.

use std::sync::{Mutex, PoisonError};

use waymark_geo::{AlertRadius, Coordinate, Destination};

use crate::{AlertService, NetError};

pub const NO_DESTINATION: &str = "No destination set";
pub const ARRIVED: &str = "You have reached your destination!";
pub const KEEP_GOING: &str = "Keep going!";
pub const DESTINATION_SET: &str = "Destination set";
pub const RADIUS_UPDATED: &str = "Alert radius updated";
pub const RUNNING: &str = "Server is running";

#[derive(Debug, Default)]
struct ServiceState {
    target: Option<Coordinate>,
    radius: AlertRadius,
}

/// Alert evaluation without a server.
///
/// The radius that counts is the one last stored through
/// `submit_destination` or `update_radius`; the radius carried by a location
/// report is ignored, matching the remote service.
#[derive(Debug, Default)]
pub struct LocalAlertService {
    state: Mutex<ServiceState>,
}

impl LocalAlertService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destination currently held, if any
    pub fn destination(&self) -> Option<Destination> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.target.map(|c| Destination::new(c, state.radius))
    }

    fn evaluate(&self, position: &Coordinate) -> &'static str {
        match self.destination() {
            None => NO_DESTINATION,
            Some(dest) if dest.contains(position) => ARRIVED,
            Some(_) => KEEP_GOING,
        }
    }
}

impl AlertService for LocalAlertService {
    async fn submit_destination(&self, destination: Destination) -> Result<String, NetError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.target = Some(destination.coordinate);
        state.radius = destination.alert_radius;
        Ok(DESTINATION_SET.to_string())
    }

    async fn report_location(&self, position: Coordinate, _radius: AlertRadius) -> Result<String, NetError> {
        Ok(self.evaluate(&position).to_string())
    }

    async fn update_radius(&self, radius: AlertRadius) -> Result<String, NetError> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).radius = radius;
        Ok(RADIUS_UPDATED.to_string())
    }

    async fn status(&self) -> Result<String, NetError> {
        Ok(RUNNING.to_string())
    }
}

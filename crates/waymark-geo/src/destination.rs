//! Destination

use crate::{AlertRadius, Coordinate};
use serde::{Deserialize, Serialize};

/// Target point with the radius that triggers an arrival alert
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub coordinate: Coordinate,
    pub alert_radius: AlertRadius,
}

impl Destination {
    pub fn new(coordinate: Coordinate, alert_radius: AlertRadius) -> Self {
        Self { coordinate, alert_radius }
    }

    /// Same point, different radius
    pub fn with_radius(self, alert_radius: AlertRadius) -> Self {
        Self { alert_radius, ..self }
    }

    /// Whether `position` lies strictly inside the alert radius.
    ///
    /// Distance is truncated to whole meters before comparing.
    pub fn contains(&self, position: &Coordinate) -> bool {
        let distance = self.coordinate.distance_to(position) as u64;
        distance < u64::from(self.alert_radius.meters())
    }
}

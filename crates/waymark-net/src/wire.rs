//! Wire types
//!
//! JSON bodies exchanged with the alert service. Field names follow the
//! service's camelCase convention.

use serde::{Deserialize, Serialize};
use waymark_geo::{AlertRadius, Coordinate, Destination};

pub const SET_DESTINATION: &str = "set_destination";
pub const LOCATION: &str = "location";
pub const SET_ALERT_RADIUS: &str = "set_alert_radius";
pub const STATUS: &str = "status";

/// Body of `POST /set_destination` and `POST /location`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionPayload {
    pub latitude: f64,
    pub longitude: f64,
    pub alert_radius: u32,
}

impl PositionPayload {
    pub fn new(coordinate: Coordinate, radius: AlertRadius) -> Self {
        Self {
            latitude: coordinate.latitude(),
            longitude: coordinate.longitude(),
            alert_radius: radius.meters(),
        }
    }
}

impl From<Destination> for PositionPayload {
    fn from(dest: Destination) -> Self {
        Self::new(dest.coordinate, dest.alert_radius)
    }
}

/// Body of `POST /set_alert_radius`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadiusPayload {
    pub alert_radius: u32,
}

/// Reply carrying a status line; other fields are ignored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReply {
    pub status: String,
}

/// Reply to a location report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertReply {
    pub alert: String,
}

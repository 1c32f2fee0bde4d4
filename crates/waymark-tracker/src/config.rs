//! Tracker Configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use waymark_geo::{AlertRadius, Coordinate};

/// Where the map opens when no position can be sampled (central London)
pub const DEFAULT_LOCATION: Coordinate = Coordinate::from_degrees(51.505, -0.09);

/// Period between tracking cycles
pub const DEFAULT_INTERVAL_MS: u64 = 5000;

/// Tracker configuration options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Milliseconds between sample-and-report cycles
    pub interval_ms: u64,

    /// Map center used when the first sample fails
    pub default_location: Coordinate,

    /// Alert radius before the user sets one
    pub default_radius: AlertRadius,

    /// Log per-cycle events at INFO instead of DEBUG
    pub verbose_logging: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            default_location: DEFAULT_LOCATION,
            default_radius: AlertRadius::DEFAULT,
            verbose_logging: false,
        }
    }
}

impl TrackerConfig {
    /// Cycle period, never shorter than one millisecond
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

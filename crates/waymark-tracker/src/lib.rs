//! Waymark Tracker
//!
//! The proximity-alert loop: a destination store plus a controller that
//! samples the user's position on a fixed period and reports it to an alert
//! service.
//!
//! # Example
//! ```rust,ignore
//! use waymark_tracker::{TrackerConfig, TrackingController};
//!
//! let tracker = TrackingController::new(TrackerConfig::default(), source, service, view);
//! tracker.destinations().set_destination(Coordinate::new(51.5, -0.09)?);
//! tracker.start();
//! ```

mod config;
mod controller;
mod store;
pub mod view;

pub use config::{TrackerConfig, DEFAULT_INTERVAL_MS, DEFAULT_LOCATION};
pub use controller::{TrackingController, TrackingState};
pub use store::DestinationStore;
pub use view::{MapView, StatusBoard};

//! Presentation seams
//!
//! The tracker never draws anything itself. A front end implements these
//! traits and receives plain update calls. Implementations must not call back
//! into the controller from inside a callback.

use waymark_geo::{Coordinate, Destination};

/// Label shown on the tracking button while Idle
pub const START_LABEL: &str = "Start Tracking";
/// Label shown on the tracking button while Active
pub const STOP_LABEL: &str = "Stop Tracking";

/// Map renderer
pub trait MapView: Send + Sync {
    /// Create the map centered on `center` with a "you are here" marker
    fn initialize(&self, center: Coordinate);

    /// Move the "you are here" marker
    fn move_marker(&self, position: Coordinate);

    /// Replace the destination marker and its radius circle
    fn show_destination(&self, destination: &Destination);

    /// Remove the destination marker and circle
    fn clear_destination(&self);
}

/// Text surfaces next to the map
pub trait StatusBoard: Send + Sync {
    /// Last sample, or the reason sampling failed
    fn set_status(&self, text: &str);

    /// Alert line answered by the service
    fn set_alert(&self, text: &str);

    fn set_tracking_label(&self, label: &str);
}

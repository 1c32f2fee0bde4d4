//! Terminal front end
//!
//! Prints status and alert lines; map updates go to the log.

use std::sync::{Mutex, PoisonError};

use waymark_geo::{Coordinate, Destination};
use waymark_tracker::{MapView, StatusBoard};

#[derive(Debug, Default)]
pub struct ConsoleView {
    last_alert: Mutex<Option<String>>,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `text` as the latest alert; true if it differs from the last one
    fn alert_changed(&self, text: &str) -> bool {
        let mut last = self.last_alert.lock().unwrap_or_else(PoisonError::into_inner);
        if last.as_deref() == Some(text) {
            return false;
        }
        *last = Some(text.to_string());
        true
    }
}

impl MapView for ConsoleView {
    fn initialize(&self, center: Coordinate) {
        tracing::info!("map centered on {}", center);
    }

    fn move_marker(&self, position: Coordinate) {
        tracing::debug!("you are here: {}", position);
    }

    fn show_destination(&self, destination: &Destination) {
        tracing::info!(
            "destination {} (alert radius {})",
            destination.coordinate,
            destination.alert_radius
        );
    }

    fn clear_destination(&self) {
        tracing::info!("destination cleared");
    }
}

impl StatusBoard for ConsoleView {
    fn set_status(&self, text: &str) {
        println!("status: {text}");
    }

    fn set_alert(&self, text: &str) {
        if self.alert_changed(text) {
            println!("alert:  {text}");
        }
    }

    fn set_tracking_label(&self, label: &str) {
        tracing::debug!("tracking button: {}", label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_alert_is_suppressed() {
        let view = ConsoleView::new();
        assert!(view.alert_changed("Keep going!"));
        assert!(!view.alert_changed("Keep going!"));
        assert!(view.alert_changed("You have reached your destination!"));
        assert!(view.alert_changed("Keep going!"));
    }
}

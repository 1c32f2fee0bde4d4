//! Alert service seam

use crate::NetError;
use std::future::Future;
use std::sync::Arc;
use waymark_geo::{AlertRadius, Coordinate, Destination};

/// The remote side that evaluates proximity.
///
/// Every method returns the human-readable line the service answered with.
pub trait AlertService: Send + Sync {
    /// `POST /set_destination`, answers the `status` line
    fn submit_destination(
        &self,
        destination: Destination,
    ) -> impl Future<Output = Result<String, NetError>> + Send;

    /// `POST /location`, answers the `alert` line
    fn report_location(
        &self,
        position: Coordinate,
        radius: AlertRadius,
    ) -> impl Future<Output = Result<String, NetError>> + Send;

    /// `POST /set_alert_radius`, answers the `status` line
    fn update_radius(
        &self,
        radius: AlertRadius,
    ) -> impl Future<Output = Result<String, NetError>> + Send;

    /// `GET /status`
    fn status(&self) -> impl Future<Output = Result<String, NetError>> + Send;
}

impl<T: AlertService> AlertService for Arc<T> {
    fn submit_destination(
        &self,
        destination: Destination,
    ) -> impl Future<Output = Result<String, NetError>> + Send {
        (**self).submit_destination(destination)
    }

    fn report_location(
        &self,
        position: Coordinate,
        radius: AlertRadius,
    ) -> impl Future<Output = Result<String, NetError>> + Send {
        (**self).report_location(position, radius)
    }

    fn update_radius(
        &self,
        radius: AlertRadius,
    ) -> impl Future<Output = Result<String, NetError>> + Send {
        (**self).update_radius(radius)
    }

    fn status(&self) -> impl Future<Output = Result<String, NetError>> + Send {
        (**self).status()
    }
}

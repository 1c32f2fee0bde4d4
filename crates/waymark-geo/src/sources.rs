//! Simple location sources
//!
//! Deterministic providers for demos, simulations and tests.

use crate::{Coordinate, GeolocationError, LocationSource};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Always reports the same coordinate
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    coordinate: Coordinate,
}

impl FixedLocation {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

impl LocationSource for FixedLocation {
    async fn current_location(&self) -> Result<Coordinate, GeolocationError> {
        Ok(self.coordinate)
    }
}

/// Replays a list of coordinates, one per request.
///
/// Once the route is exhausted the final point is reported forever.
#[derive(Debug)]
pub struct RouteLocation {
    points: Vec<Coordinate>,
    cursor: AtomicUsize,
}

impl RouteLocation {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self {
            points,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl LocationSource for RouteLocation {
    async fn current_location(&self) -> Result<Coordinate, GeolocationError> {
        let last = self
            .points
            .len()
            .checked_sub(1)
            .ok_or_else(|| GeolocationError::PositionUnavailable("route is empty".into()))?;
        let index = self.cursor.fetch_add(1, Ordering::SeqCst).min(last);
        Ok(self.points[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_repeats_last_point() {
        let a = Coordinate::new(1.0, 1.0).unwrap();
        let b = Coordinate::new(2.0, 2.0).unwrap();
        let route = RouteLocation::new(vec![a, b]);

        smol::block_on(async {
            assert_eq!(route.current_location().await.unwrap(), a);
            assert_eq!(route.current_location().await.unwrap(), b);
            assert_eq!(route.current_location().await.unwrap(), b);
        });
    }

    #[test]
    fn test_empty_route() {
        let route = RouteLocation::new(Vec::new());
        let err = smol::block_on(route.current_location()).unwrap_err();
        assert!(matches!(err, GeolocationError::PositionUnavailable(_)));
    }
}

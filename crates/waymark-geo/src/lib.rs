//! Waymark Geo
//!
//! Geographic value types and location sources.
//!
//! # Example
//! ```rust,ignore
//! use waymark_geo::{Coordinate, FixedLocation, LocationSource};
//!
//! let source = FixedLocation::new(Coordinate::new(51.5, -0.09)?);
//! let here = source.current_location().await?;
//! ```

mod coordinate;
mod radius;
mod destination;
pub mod geolocation;
pub mod sources;

pub use coordinate::{Coordinate, CoordinateError, haversine_distance_meters, EARTH_RADIUS_M};
pub use radius::{AlertRadius, RadiusError};
pub use destination::Destination;
pub use geolocation::{
    Geolocation, GeolocationError, GeolocationOptions, LocationSource, NoProvider, PermissionState,
};
pub use sources::{FixedLocation, RouteLocation};

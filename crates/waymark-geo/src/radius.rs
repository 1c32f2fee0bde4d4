//! Alert radius
//!
//! Distance threshold around a destination, in whole meters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Rejected radius input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RadiusError {
    #[error("alert radius is empty")]
    Empty,

    #[error("alert radius {0:?} is not a whole number of meters")]
    NotANumber(String),

    #[error("alert radius must be positive, got {0}")]
    NotPositive(i64),
}

/// Positive alert radius in meters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct AlertRadius(NonZeroU32);

impl AlertRadius {
    /// Radius used until the user picks one
    pub const DEFAULT: AlertRadius = AlertRadius(NonZeroU32::new(50).unwrap());

    pub fn new(meters: u32) -> Result<Self, RadiusError> {
        NonZeroU32::new(meters)
            .map(Self)
            .ok_or(RadiusError::NotPositive(0))
    }

    pub fn meters(&self) -> u32 {
        self.0.get()
    }
}

impl Default for AlertRadius {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for AlertRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} m", self.0)
    }
}

impl TryFrom<i64> for AlertRadius {
    type Error = RadiusError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(RadiusError::NotPositive(value));
        }
        u32::try_from(value)
            .map_err(|_| RadiusError::NotANumber(value.to_string()))
            .and_then(Self::new)
    }
}

impl From<AlertRadius> for u32 {
    fn from(radius: AlertRadius) -> Self {
        radius.meters()
    }
}

impl FromStr for AlertRadius {
    type Err = RadiusError;

    /// Accepts a plain base-10 integer, surrounding whitespace ignored.
    /// An explicit `+` sign is not part of that.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RadiusError::Empty);
        }
        if s.starts_with('+') {
            return Err(RadiusError::NotANumber(s.to_string()));
        }
        let value: i64 = s
            .parse()
            .map_err(|_| RadiusError::NotANumber(s.to_string()))?;
        Self::try_from(value)
    }
}

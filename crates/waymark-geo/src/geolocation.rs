//! Geolocation
//!
//! Single-shot position lookups with permission handling.
//!
//! [`LocationSource`] is the seam every sampler plugs into. [`Geolocation`]
//! wraps a raw position provider the way a platform geolocation service does:
//! requests are gated on a permission state and bounded by a timeout.

use crate::Coordinate;
use smol::Timer;
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Why a position could not be sampled
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("User denied geolocation permission")]
    PermissionDenied,

    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),

    #[error("Geolocation request timed out")]
    Timeout,

    #[error("Geolocation is not supported on this platform")]
    Unsupported,
}

/// Anything that can produce the device's current coordinate.
///
/// Each call is independent: no caching, no debouncing.
pub trait LocationSource: Send + Sync {
    fn current_location(&self) -> impl Future<Output = Result<Coordinate, GeolocationError>> + Send;
}

impl<T: LocationSource> LocationSource for std::sync::Arc<T> {
    fn current_location(&self) -> impl Future<Output = Result<Coordinate, GeolocationError>> + Send {
        (**self).current_location()
    }
}

/// Geolocation options
#[derive(Debug, Clone)]
pub struct GeolocationOptions {
    pub timeout: Duration,
}

impl Default for GeolocationOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(5000),
        }
    }
}

/// Permission state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Denied,
    Prompt,
}

/// Provider for platforms without any positioning hardware
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProvider;

impl LocationSource for NoProvider {
    async fn current_location(&self) -> Result<Coordinate, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

/// Permission-gated, time-bounded position lookups
#[derive(Debug)]
pub struct Geolocation<P> {
    provider: P,
    permission: Mutex<PermissionState>,
    options: GeolocationOptions,
}

impl Geolocation<NoProvider> {
    /// A geolocation service that always reports `Unsupported`
    pub fn unsupported() -> Self {
        Self::new(NoProvider)
    }
}

impl<P: LocationSource> Geolocation<P> {
    pub fn new(provider: P) -> Self {
        Self::with_options(provider, GeolocationOptions::default())
    }

    pub fn with_options(provider: P, options: GeolocationOptions) -> Self {
        Self {
            provider,
            permission: Mutex::new(PermissionState::Prompt),
            options,
        }
    }

    pub fn permission(&self) -> PermissionState {
        *self.permission.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn grant(&self) {
        self.set_permission(PermissionState::Granted);
    }

    pub fn deny(&self) {
        self.set_permission(PermissionState::Denied);
    }

    fn set_permission(&self, state: PermissionState) {
        *self.permission.lock().unwrap_or_else(PoisonError::into_inner) = state;
        tracing::debug!("geolocation permission: {:?}", state);
    }

    /// Resolve a pending prompt.
    ///
    /// There is no interactive prompt, so a pending request is granted the
    /// first time a position is asked for.
    fn check_permission(&self) -> Result<(), GeolocationError> {
        let mut state = self.permission.lock().unwrap_or_else(PoisonError::into_inner);
        match *state {
            PermissionState::Granted => Ok(()),
            PermissionState::Denied => Err(GeolocationError::PermissionDenied),
            PermissionState::Prompt => {
                *state = PermissionState::Granted;
                tracing::info!("geolocation permission granted");
                Ok(())
            }
        }
    }
}

impl<P: LocationSource> LocationSource for Geolocation<P> {
    async fn current_location(&self) -> Result<Coordinate, GeolocationError> {
        self.check_permission()?;

        let timeout = self.options.timeout;
        smol::future::or(self.provider.current_location(), async move {
            Timer::after(timeout).await;
            Err(GeolocationError::Timeout)
        })
        .await
    }
}

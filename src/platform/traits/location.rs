//! Location provider interface

use async_trait::async_trait;
use tire_torture_core::{Coordinate, LocationAccuracy};

use crate::measurement::LocationError;

/// Source of GPS fixes
///
/// Implemented by platform glue (phone geolocation API, simulator). Must be
/// `Send + Sync` so one provider can serve concurrent requests from the
/// command path and the sensor path.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Human-readable provider name for logging
    fn name(&self) -> &str;

    /// Request the current position
    ///
    /// Suspends until the platform returns a fix or fails. Failures are
    /// never fatal to the caller.
    async fn request_fix(&self, accuracy: LocationAccuracy) -> Result<Coordinate, LocationError>;
}

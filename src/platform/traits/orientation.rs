//! Orientation sensor interface

use async_trait::async_trait;
use tire_torture_core::{Quaternion, SensorSpeed};

use crate::measurement::SensorError;

/// Stream of device orientation quaternions
///
/// # Lifecycle
///
/// 1. `start(speed)` - Begin monitoring (may fail if unsupported or denied)
/// 2. `next_reading()` - Await readings until the stream ends (`None`)
/// 3. `stop()` - Stop monitoring
#[async_trait]
pub trait OrientationSensor: Send {
    /// Begin monitoring at the requested speed
    fn start(&mut self, speed: SensorSpeed) -> Result<(), SensorError>;

    /// Stop monitoring; further `next_reading` calls return `None`
    fn stop(&mut self);

    /// Check if the sensor is currently monitoring
    fn is_monitoring(&self) -> bool;

    /// Wait for the next reading
    ///
    /// Returns `None` when the stream has ended.
    async fn next_reading(&mut self) -> Option<Result<Quaternion<f64>, SensorError>>;
}

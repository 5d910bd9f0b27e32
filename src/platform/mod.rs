//! Platform abstraction layer
//!
//! Geolocation and orientation sensing are platform services. This module
//! defines the interfaces the measurement core depends on, plus scripted
//! implementations for host testing.

pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use traits::{LocationProvider, OrientationSensor};

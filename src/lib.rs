//! tire_torture - Walk distance, tire rotation and angled walk measurement
//!
//! Host-side crate built on `tire_torture_core`. It owns the measurement
//! state machine and talks to the phone through two collaborator traits.
//!
//! # Architecture
//!
//! - [`core`]: logging macros
//! - [`measurement`]: mode controller, async service, display records
//! - [`platform`]: location and orientation collaborator traits, plus
//!   scripted mocks behind the `mock` feature

pub mod core;
pub mod measurement;
pub mod platform;

pub use measurement::{
    DisplayUpdate, LocationError, MeasurementError, MeasurementService, ModeController,
    SensorError,
};
pub use platform::{LocationProvider, OrientationSensor};

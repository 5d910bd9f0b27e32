//! Walk simulator for host testing of the measurement service.
//!
//! Provides a simulated phone (location provider and orientation sensor)
//! carried by a walker moving at constant speed along a heading.

pub mod error;
pub mod walker;

pub use error::SimulatorError;
pub use walker::{
    FailureConfig, FailureKind, SimLocationProvider, SimOrientationSensor, SimulatedWalk,
    WalkConfig,
};

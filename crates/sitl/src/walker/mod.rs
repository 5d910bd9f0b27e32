//! Simulated walk: scenario configuration and phone collaborators.

mod config;
mod walk;

pub use config::{FailureConfig, FailureKind, WalkConfig};
pub use walk::{SimLocationProvider, SimOrientationSensor, SimulatedWalk};

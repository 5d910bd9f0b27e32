//! Measurement error taxonomy
//!
//! Every error is recoverable. Collaborator failures are turned into display
//! strings at the controller boundary; state machine violations are returned
//! from `handle_command` and leave the mode untouched.

use tire_torture_core::{Command, MeasurementMode};

/// Failure reported by a location provider
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("This feature is not supported on this device!")]
    NotSupported,

    #[error("This feature is not enabled on this device!")]
    NotEnabled,

    #[error("This feature is not permitted on this device!")]
    PermissionDenied,

    #[error("Exception!")]
    Unknown(String),
}

/// Failure reported by an orientation sensor
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SensorError {
    #[error("The Orientation sensor is not supported on this device!")]
    NotSupported,

    #[error("The Orientation sensor is not enabled on this device!")]
    NotEnabled,

    #[error("Permission Exception")]
    PermissionDenied,

    #[error("Unknown Startup Exception!")]
    Unknown(String),
}

/// Errors surfaced by the measurement controller
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeasurementError {
    #[error("{reason}")]
    LocationUnavailable { reason: LocationError },

    #[error("You can only run one function at a time!")]
    ModeConflict {
        active: MeasurementMode,
        command: Command,
    },

    #[error("The Euler Angle needs to be between {low} and {high}")]
    OrientationOutOfRange { roll: f64, low: f64, high: f64 },

    #[error("{reason}")]
    SensorUnavailable { reason: SensorError },
}

impl From<LocationError> for MeasurementError {
    fn from(reason: LocationError) -> Self {
        MeasurementError::LocationUnavailable { reason }
    }
}

impl From<SensorError> for MeasurementError {
    fn from(reason: SensorError) -> Self {
        MeasurementError::SensorUnavailable { reason }
    }
}

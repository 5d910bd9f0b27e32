//! Measurement mode handling
//!
//! - [`controller`]: synchronous mode state machine
//! - [`service`]: async driver resolving location fixes and sensor readings
//! - [`display`]: plain update records for the UI
//! - [`error`]: error taxonomy

pub mod controller;
pub mod display;
pub mod error;
pub mod service;

pub use controller::{FixRequest, ModeController, Transition};
pub use display::DisplayUpdate;
pub use error::{LocationError, MeasurementError, SensorError};
pub use service::MeasurementService;

//! Measurement State Machine Types and Utilities
//!
//! This module provides pure types and utilities for the measurement state
//! machine. The controller that drives them (and talks to the location
//! provider) lives in the host crate.
//!
//! # Contents
//!
//! - `MeasurementMode`, `MeasurementSession` and fix tagging types
//! - `Command` definitions
//! - `AcceptanceWindow` for angled walks
//! - Distance utilities (haversine, rounding)

mod command;
mod nav;
mod state;
mod window;

pub use command::Command;
pub use nav::{haversine_distance, offset_by, round_centi, EARTH_RADIUS_M};
pub use state::{
    Coordinate, FixPhase, FixTicket, Generation, Measurement, MeasurementMode, MeasurementSession,
};
pub use window::AcceptanceWindow;

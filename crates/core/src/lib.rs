//! tire_torture_core - Pure no_std measurement logic for tire_torture
//!
//! This crate contains platform-agnostic algorithms and types that can be
//! tested on host without any platform collaborators.
//!
//! # Design Principles
//!
//! - **Pure no_std**: No std library dependencies
//! - **No I/O**: Location and sensor access are injected by the host crate
//!
//! # Modules
//!
//! - [`orientation`]: Quaternion to Euler angle conversion
//! - [`mode`]: Measurement modes, sessions, commands and distance utilities
//! - [`parameters`]: Parameter store and measurement parameters
//! - [`request`]: Location accuracy and sensor speed settings

#![no_std]

pub mod mode;
pub mod orientation;
pub mod parameters;
pub mod request;

pub use mode::{
    AcceptanceWindow, Command, Coordinate, FixPhase, FixTicket, Generation, Measurement,
    MeasurementMode, MeasurementSession,
};
pub use orientation::{quaternion_to_euler, EulerAngles, Quaternion};
pub use parameters::MeasurementParams;
pub use request::{LocationAccuracy, SensorSpeed};

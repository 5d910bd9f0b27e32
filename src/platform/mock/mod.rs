//! Mock collaborators for testing
//!
//! Scripted implementations of the platform traits that can be used for
//! unit testing without a phone.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled

#![cfg(any(test, feature = "mock"))]

mod location;
mod orientation;

pub use location::{GatedLocationProvider, PendingFix, ScriptedLocationProvider};
pub use orientation::ScriptedOrientationSensor;

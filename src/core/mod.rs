//! Core infrastructure
//!
//! Cross-cutting facilities shared by the measurement controller and the
//! simulator crate.

pub mod logging;

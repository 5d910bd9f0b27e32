//! Parameter management types and utilities
//!
//! This module provides the parameter store and the measurement parameter
//! block that configures the controller.

pub mod error;
pub mod measurement;
pub mod storage;

pub use error::ParameterError;
pub use measurement::MeasurementParams;
pub use storage::{
    ParamFlags, ParamMetadata, ParamValue, ParameterStore, MAX_PARAMS, PARAM_NAME_LEN,
};

//! Collaborator traits
//!
//! The measurement core consumes these interfaces; platform glue (or the
//! simulator crate) implements them.

pub mod location;
pub mod orientation;

pub use location::LocationProvider;
pub use orientation::OrientationSensor;

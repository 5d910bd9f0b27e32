//! Orientation types and utilities
//!
//! Converts the quaternion readings delivered by a phone orientation sensor
//! into roll/pitch/yaw angles. Sensor access itself lives in the host crate.

mod euler;

pub use euler::{euler_to_quaternion, quaternion_to_euler, EulerAngles};
pub use nalgebra::Quaternion;

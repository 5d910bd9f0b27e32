//! Quaternion to Euler angle conversion
//!
//! # Coordinate System
//!
//! - Quaternion: scalar-first (w, x, y, z), as reported by phone orientation sensors
//! - Euler sequence: ZYX (yaw-pitch-roll)
//! - All angles in radians

use core::f64::consts::FRAC_PI_2;

use libm::{asin, atan2, fabs};
use nalgebra::{Quaternion, UnitQuaternion};

/// Roll/pitch/yaw decomposition of a device orientation
///
/// Only the latest value is kept by the controller; there is no history.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EulerAngles {
    /// Rotation about the x axis (radians)
    pub roll: f64,
    /// Rotation about the y axis (radians), always within [-pi/2, pi/2]
    pub pitch: f64,
    /// Rotation about the z axis (radians)
    pub yaw: f64,
}

impl EulerAngles {
    pub const fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Extract Euler angles from a sensor quaternion
    pub fn from_quaternion(q: &Quaternion<f64>) -> Self {
        quaternion_to_euler(q)
    }

    /// Get roll in degrees
    pub fn roll_deg(&self) -> f64 {
        self.roll.to_degrees()
    }

    /// Get pitch in degrees
    pub fn pitch_deg(&self) -> f64 {
        self.pitch.to_degrees()
    }

    /// Get yaw in degrees
    pub fn yaw_deg(&self) -> f64 {
        self.yaw.to_degrees()
    }
}

/// Convert a quaternion to Euler angles (ZYX convention)
///
/// Pitch is clamped to +/-pi/2 when `|2(wy - zx)| >= 1` instead of calling
/// `asin`, so numerical overshoot at the poles never yields NaN. A
/// non-finite quaternion maps to zero angles.
pub fn quaternion_to_euler(q: &Quaternion<f64>) -> EulerAngles {
    let (w, x, y, z) = (q.w, q.i, q.j, q.k);
    if !(w.is_finite() && x.is_finite() && y.is_finite() && z.is_finite()) {
        return EulerAngles::default();
    }

    // roll (x-axis rotation)
    let sinr_cosp = 2.0 * (w * x + y * z);
    let cosr_cosp = 1.0 - 2.0 * (x * x + y * y);
    let roll = atan2(sinr_cosp, cosr_cosp);

    // pitch (y-axis rotation)
    let sinp = 2.0 * (w * y - z * x);
    let pitch = if fabs(sinp) >= 1.0 {
        if sinp >= 0.0 {
            FRAC_PI_2
        } else {
            -FRAC_PI_2
        }
    } else {
        asin(sinp)
    };

    // yaw (z-axis rotation)
    let siny_cosp = 2.0 * (w * z + x * y);
    let cosy_cosp = 1.0 - 2.0 * (y * y + z * z);
    let yaw = atan2(siny_cosp, cosy_cosp);

    EulerAngles { roll, pitch, yaw }
}

/// Convert Euler angles to a quaternion (ZYX convention)
pub fn euler_to_quaternion(roll: f64, pitch: f64, yaw: f64) -> Quaternion<f64> {
    *UnitQuaternion::from_euler_angles(roll, pitch, yaw).quaternion()
}

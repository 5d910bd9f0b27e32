//! Walk scenario configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tire_torture::LocationError;
use tire_torture_core::SensorSpeed;

use crate::error::SimulatorError;

/// Configuration for a simulated walk.
///
/// Every field has a default, so a scenario file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Start latitude in degrees.
    pub origin_lat_deg: f64,
    /// Start longitude in degrees.
    pub origin_lon_deg: f64,
    /// Walking speed in m/s.
    pub speed_mps: f64,
    /// Walking direction in degrees clockwise from north.
    pub heading_deg: f64,
    /// Roll of the hand-held phone in radians.
    pub roll_rad: f64,
    /// Roll noise standard deviation in radians.
    pub roll_noise_rad: f64,
    /// GPS position noise standard deviation in meters.
    pub gps_noise_m: f64,
    /// Time a location request takes to answer, in milliseconds.
    pub fix_delay_ms: u64,
    /// Orientation sensor speed as stored in `ORI_SPEED`.
    pub sensor_speed: i32,
    /// RNG seed for deterministic mode. None = random.
    pub seed: Option<u64>,
    /// Failure injected into location requests.
    pub failure: Option<FailureConfig>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            origin_lat_deg: 35.6762,
            origin_lon_deg: 139.6503,
            speed_mps: 1.4,
            heading_deg: 0.0,
            roll_rad: 0.6,
            roll_noise_rad: 0.0,
            gps_noise_m: 0.0,
            fix_delay_ms: 0,
            sensor_speed: 0,
            seed: None,
            failure: None,
        }
    }
}

impl WalkConfig {
    /// Parse a JSON scenario and validate it.
    pub fn from_json(json: &str) -> Result<Self, SimulatorError> {
        let config: WalkConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON scenario file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimulatorError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), SimulatorError> {
        if !(-90.0..=90.0).contains(&self.origin_lat_deg)
            || !(-180.0..=180.0).contains(&self.origin_lon_deg)
        {
            return Err(SimulatorError::InvalidConfig(format!(
                "origin {},{} out of range",
                self.origin_lat_deg, self.origin_lon_deg
            )));
        }
        if !self.speed_mps.is_finite() || self.speed_mps < 0.0 {
            return Err(SimulatorError::InvalidConfig(format!(
                "speed {} must be non-negative",
                self.speed_mps
            )));
        }
        if !self.heading_deg.is_finite() || !self.roll_rad.is_finite() {
            return Err(SimulatorError::InvalidConfig(
                "heading and roll must be finite".into(),
            ));
        }
        if !(self.roll_noise_rad >= 0.0) || !(self.gps_noise_m >= 0.0) {
            return Err(SimulatorError::InvalidConfig(
                "noise must be non-negative".into(),
            ));
        }
        if SensorSpeed::from_param(self.sensor_speed).is_none() {
            return Err(SimulatorError::InvalidConfig(format!(
                "unknown sensor speed {}",
                self.sensor_speed
            )));
        }
        Ok(())
    }

    /// Sensor speed, falling back to the default for unknown values.
    pub fn sensor_speed(&self) -> SensorSpeed {
        SensorSpeed::from_param(self.sensor_speed).unwrap_or_default()
    }
}

/// Location failure injected from a given request on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureConfig {
    /// Number of requests answered normally before failures start.
    #[serde(default)]
    pub after_requests: u32,
    pub kind: FailureKind,
}

impl FailureConfig {
    /// Whether the request with zero-based index `request` fails.
    pub fn applies_to(&self, request: u32) -> bool {
        request >= self.after_requests
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    NotSupported,
    NotEnabled,
    PermissionDenied,
    Unknown,
}

impl FailureKind {
    pub fn to_error(self) -> LocationError {
        match self {
            FailureKind::NotSupported => LocationError::NotSupported,
            FailureKind::NotEnabled => LocationError::NotEnabled,
            FailureKind::PermissionDenied => LocationError::PermissionDenied,
            FailureKind::Unknown => LocationError::Unknown("injected failure".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_scenario_uses_defaults() {
        let config = WalkConfig::from_json(r#"{"speed_mps": 2.0, "seed": 7}"#).unwrap();
        assert_eq!(config.speed_mps, 2.0);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.roll_rad, WalkConfig::default().roll_rad);
    }

    #[test]
    fn test_failure_parses() {
        let config = WalkConfig::from_json(
            r#"{"failure": {"after_requests": 1, "kind": "permission_denied"}}"#,
        )
        .unwrap();
        let failure = config.failure.unwrap();
        assert!(!failure.applies_to(0));
        assert!(failure.applies_to(1));
        assert_eq!(failure.kind.to_error(), LocationError::PermissionDenied);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            WalkConfig::from_json(r#"{"speed_mps": -1.0}"#),
            Err(SimulatorError::InvalidConfig(_))
        ));
        assert!(matches!(
            WalkConfig::from_json(r#"{"sensor_speed": 9}"#),
            Err(SimulatorError::InvalidConfig(_))
        ));
        assert!(matches!(
            WalkConfig::from_json(r#"{"origin_lat_deg": 91.0}"#),
            Err(SimulatorError::InvalidConfig(_))
        ));
        assert!(matches!(
            WalkConfig::from_json("not json"),
            Err(SimulatorError::Scenario(_))
        ));
    }

    #[test]
    fn test_sensor_speed_mapping() {
        let config = WalkConfig {
            sensor_speed: 2,
            ..Default::default()
        };
        assert_eq!(config.sensor_speed(), SensorSpeed::Game);
    }
}

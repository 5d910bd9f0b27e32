//! Measurement Parameter Definitions
//!
//! # Parameters
//!
//! - `AWLK_ROLL_MIN` - Angled walk acceptance window low bound (rad)
//! - `AWLK_ROLL_MAX` - Angled walk acceptance window high bound (rad)
//! - `ROT_DIST_M` - Meters of travel per tire rotation (0 = rotation counting off)
//! - `LOC_ACCURACY` - Location request accuracy (0=lowest .. 4=best)
//! - `ORI_SPEED` - Orientation sensor speed (0=default, 1=ui, 2=game, 3=fastest)
//!
//! Different handsets ship with different windows (e.g. `[0.4, 0.95]` for a
//! right-hand grip, `[-0.7, -0.25]` for the mirrored grip), so neither bound
//! is hardcoded in the controller.

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::mode::AcceptanceWindow;
use crate::request::{LocationAccuracy, SensorSpeed};

/// Default acceptance window low bound (rad)
const DEFAULT_ROLL_MIN: f64 = 0.4;

/// Default acceptance window high bound (rad)
const DEFAULT_ROLL_MAX: f64 = 0.95;

/// Default travel per tire rotation in meters
const DEFAULT_ROT_DIST_M: f64 = 10.0;

/// Maximum travel per tire rotation in meters
const MAX_ROT_DIST_M: f64 = 100.0;

/// Roll bounds are clamped to +/-pi
const ROLL_LIMIT: f64 = core::f64::consts::PI;

/// Measurement parameters loaded from parameter store
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementParams {
    /// Acceptance window low bound (rad)
    pub roll_min: f64,
    /// Acceptance window high bound (rad)
    pub roll_max: f64,
    /// Meters per tire rotation, 0 disables rotation counting
    pub rotation_distance_m: f64,
    /// Accuracy requested from the location provider
    pub location_accuracy: LocationAccuracy,
    /// Rate requested from the orientation sensor
    pub sensor_speed: SensorSpeed,
}

impl Default for MeasurementParams {
    fn default() -> Self {
        Self {
            roll_min: DEFAULT_ROLL_MIN,
            roll_max: DEFAULT_ROLL_MAX,
            rotation_distance_m: DEFAULT_ROT_DIST_M,
            location_accuracy: LocationAccuracy::default(),
            sensor_speed: SensorSpeed::default(),
        }
    }
}

impl MeasurementParams {
    /// Default parameters with a custom acceptance window
    pub fn with_window(roll_min: f64, roll_max: f64) -> Self {
        Self {
            roll_min,
            roll_max,
            ..Default::default()
        }
    }

    /// Register measurement parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "AWLK_ROLL_MIN",
            ParamValue::Float(DEFAULT_ROLL_MIN),
            ParamFlags::empty(),
        )?;
        store.register(
            "AWLK_ROLL_MAX",
            ParamValue::Float(DEFAULT_ROLL_MAX),
            ParamFlags::empty(),
        )?;
        store.register(
            "ROT_DIST_M",
            ParamValue::Float(DEFAULT_ROT_DIST_M),
            ParamFlags::empty(),
        )?;
        store.register(
            "LOC_ACCURACY",
            ParamValue::Int(LocationAccuracy::default().as_param()),
            ParamFlags::empty(),
        )?;
        store.register(
            "ORI_SPEED",
            ParamValue::Int(SensorSpeed::default().as_param()),
            ParamFlags::empty(),
        )?;

        Ok(())
    }

    /// Load measurement parameters from parameter store
    ///
    /// Missing or out-of-range values fall back to defaults. An inverted
    /// window (min above max) falls back to the default window as a whole.
    pub fn from_store(store: &ParameterStore) -> Self {
        let read_roll = |name: &str, default: f64| match store.get(name).and_then(|v| v.as_f64())
        {
            Some(v) if v.is_finite() => v.clamp(-ROLL_LIMIT, ROLL_LIMIT),
            _ => default,
        };

        let mut roll_min = read_roll("AWLK_ROLL_MIN", DEFAULT_ROLL_MIN);
        let mut roll_max = read_roll("AWLK_ROLL_MAX", DEFAULT_ROLL_MAX);
        if roll_min > roll_max {
            roll_min = DEFAULT_ROLL_MIN;
            roll_max = DEFAULT_ROLL_MAX;
        }

        let rotation_distance_m = match store.get("ROT_DIST_M").and_then(|v| v.as_f64()) {
            Some(v) if v.is_finite() => v.clamp(0.0, MAX_ROT_DIST_M),
            _ => DEFAULT_ROT_DIST_M,
        };

        let location_accuracy = store
            .get("LOC_ACCURACY")
            .and_then(|v| v.as_i32())
            .and_then(LocationAccuracy::from_param)
            .unwrap_or_default();

        let sensor_speed = store
            .get("ORI_SPEED")
            .and_then(|v| v.as_i32())
            .and_then(SensorSpeed::from_param)
            .unwrap_or_default();

        Self {
            roll_min,
            roll_max,
            rotation_distance_m,
            location_accuracy,
            sensor_speed,
        }
    }

    /// Validate measurement parameters
    pub fn is_valid(&self) -> bool {
        if self.acceptance_window_checked().is_none() {
            return false;
        }
        if self.roll_min < -ROLL_LIMIT || self.roll_max > ROLL_LIMIT {
            return false;
        }
        self.rotation_distance_m.is_finite()
            && (0.0..=MAX_ROT_DIST_M).contains(&self.rotation_distance_m)
    }

    /// Acceptance window for angled walks
    ///
    /// Falls back to the default window when the bounds are inverted.
    pub fn acceptance_window(&self) -> AcceptanceWindow {
        self.acceptance_window_checked().unwrap_or_default()
    }

    fn acceptance_window_checked(&self) -> Option<AcceptanceWindow> {
        AcceptanceWindow::new(self.roll_min, self.roll_max)
    }

    /// Meters per tire rotation, `None` when rotation counting is off
    pub fn rotation_calibration(&self) -> Option<f64> {
        if self.rotation_distance_m > 0.0 {
            Some(self.rotation_distance_m)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_params_defaults() {
        let params = MeasurementParams::default();
        assert!((params.roll_min - 0.4).abs() < 1e-12);
        assert!((params.roll_max - 0.95).abs() < 1e-12);
        assert_eq!(params.rotation_calibration(), Some(10.0));
        assert_eq!(params.location_accuracy, LocationAccuracy::Best);
        assert_eq!(params.sensor_speed, SensorSpeed::Default);
        assert!(params.is_valid());
    }

    #[test]
    fn test_register_then_load_matches_defaults() {
        let mut store = ParameterStore::new();
        MeasurementParams::register_defaults(&mut store).unwrap();
        assert_eq!(store.len(), 5);
        assert_eq!(
            MeasurementParams::from_store(&store),
            MeasurementParams::default()
        );
    }

    #[test]
    fn test_from_store_custom_window() {
        let mut store = ParameterStore::new();
        MeasurementParams::register_defaults(&mut store).unwrap();
        store.set("AWLK_ROLL_MIN", ParamValue::Float(-0.7)).unwrap();
        store.set("AWLK_ROLL_MAX", ParamValue::Float(-0.25)).unwrap();

        let params = MeasurementParams::from_store(&store);
        let window = params.acceptance_window();
        assert!(window.contains(-0.5));
        assert!(!window.contains(0.5));
    }

    #[test]
    fn test_from_store_inverted_window_uses_defaults() {
        let mut store = ParameterStore::new();
        MeasurementParams::register_defaults(&mut store).unwrap();
        store.set("AWLK_ROLL_MIN", ParamValue::Float(1.0)).unwrap();
        store.set("AWLK_ROLL_MAX", ParamValue::Float(0.2)).unwrap();

        let params = MeasurementParams::from_store(&store);
        assert_eq!(params.acceptance_window(), AcceptanceWindow::default());
        assert!(params.is_valid());
    }

    #[test]
    fn test_from_store_rotation_disabled() {
        let mut store = ParameterStore::new();
        MeasurementParams::register_defaults(&mut store).unwrap();
        store.set("ROT_DIST_M", ParamValue::Int(0)).unwrap();

        let params = MeasurementParams::from_store(&store);
        assert!(params.rotation_calibration().is_none());
    }

    #[test]
    fn test_from_store_clamps_rotation_distance() {
        let mut store = ParameterStore::new();
        MeasurementParams::register_defaults(&mut store).unwrap();
        store.set("ROT_DIST_M", ParamValue::Float(500.0)).unwrap();

        let params = MeasurementParams::from_store(&store);
        assert_eq!(params.rotation_calibration(), Some(MAX_ROT_DIST_M));
    }

    #[test]
    fn test_from_store_invalid_enum_falls_back() {
        let mut store = ParameterStore::new();
        MeasurementParams::register_defaults(&mut store).unwrap();
        store.set("LOC_ACCURACY", ParamValue::Int(9)).unwrap();
        store.set("ORI_SPEED", ParamValue::Int(2)).unwrap();

        let params = MeasurementParams::from_store(&store);
        assert_eq!(params.location_accuracy, LocationAccuracy::Best);
        assert_eq!(params.sensor_speed, SensorSpeed::Game);
    }

    #[test]
    fn test_from_empty_store_uses_defaults() {
        let store = ParameterStore::new();
        assert_eq!(
            MeasurementParams::from_store(&store),
            MeasurementParams::default()
        );
    }

    #[test]
    fn test_inverted_params_invalid() {
        let params = MeasurementParams::with_window(0.9, 0.1);
        assert!(!params.is_valid());
        assert_eq!(params.acceptance_window(), AcceptanceWindow::default());
    }
}

//! Display records handed to the presentation layer
//!
//! The controller never touches widgets. Every input produces a
//! `DisplayUpdate` describing what changed; the UI decides how to render it.

use tire_torture_core::{Coordinate, EulerAngles, Measurement, MeasurementMode};

/// Shown when a session ends without a start coordinate
pub const MISSING_START: &str = "Couldn't get Starting Point";

/// Shown when location permission is denied for the start fix
pub const START_PERMISSION_DENIED: &str = "Permission Exception";

/// Shown when an angled walk drifts out of the acceptance window
pub const DRIFT_ABORT: &str = "Whoops...";

/// Plain data update for the UI
///
/// `None` fields are left as currently displayed. `reset` asks the UI to
/// clear every previous output before applying this update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayUpdate {
    pub mode: MeasurementMode,
    pub angles: EulerAngles,
    pub reset: bool,
    pub status: Option<String>,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub distance: Option<String>,
    pub rotations: Option<String>,
    pub measurement: Option<Measurement>,
}

impl DisplayUpdate {
    pub fn new(mode: MeasurementMode, angles: EulerAngles) -> Self {
        Self {
            mode,
            angles,
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_reset(mut self) -> Self {
        self.reset = true;
        self
    }

    pub fn with_start(mut self, start: &Coordinate) -> Self {
        self.start_location = Some(start.to_string());
        self
    }

    pub fn with_end(mut self, end: &Coordinate) -> Self {
        self.end_location = Some(end.to_string());
        self
    }

    /// Fill distance and rotation strings from a finished measurement
    pub fn with_measurement(mut self, measurement: Measurement) -> Self {
        self.distance = Some(format_distance(measurement.distance_m));
        self.rotations = measurement.rotations.map(format_rotations);
        self.measurement = Some(measurement);
        self
    }

    /// Overlay a later update on this one
    ///
    /// Mode and angles are taken from `later`; text fields only when set.
    pub fn merge(&mut self, later: DisplayUpdate) {
        self.mode = later.mode;
        self.angles = later.angles;
        self.reset |= later.reset;
        if later.status.is_some() {
            self.status = later.status;
        }
        if later.start_location.is_some() {
            self.start_location = later.start_location;
        }
        if later.end_location.is_some() {
            self.end_location = later.end_location;
        }
        if later.distance.is_some() {
            self.distance = later.distance;
        }
        if later.rotations.is_some() {
            self.rotations = later.rotations;
        }
        if later.measurement.is_some() {
            self.measurement = later.measurement;
        }
    }
}

pub fn format_distance(distance_m: f64) -> String {
    format!("{:.2} meters have been covered!", distance_m)
}

pub fn format_rotations(rotations: f64) -> String {
    format!("{:.2} rotations have occurred!", rotations)
}

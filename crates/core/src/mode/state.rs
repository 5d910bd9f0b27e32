//! Measurement state types
//!
//! Pure state types for the measurement state machine. A session lives from
//! mode activation until the deactivation fix has been applied.

use core::fmt;

use super::nav::{haversine_distance, round_centi};

/// GPS position in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in meters
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_distance(self, other)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Latitude: {}  Longitude: {}",
            self.latitude, self.longitude
        )
    }
}

/// Measurement mode
///
/// Exactly one mode is active at a time; `Idle` means nothing is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MeasurementMode {
    #[default]
    Idle,
    /// Plain walking distance
    Distance,
    /// Distance converted to tire rotations
    Rotation,
    /// Distance walked while holding the phone inside the roll window
    AngledWalk,
}

impl MeasurementMode {
    /// Get mode name for logging and display
    pub fn name(&self) -> &'static str {
        match self {
            MeasurementMode::Idle => "Idle",
            MeasurementMode::Distance => "Distance",
            MeasurementMode::Rotation => "Rotation",
            MeasurementMode::AngledWalk => "AngledWalk",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, MeasurementMode::Idle)
    }
}

impl fmt::Display for MeasurementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Session generation tag
///
/// Incremented on every mode activation. Location fixes carry the generation
/// they were requested under so late results can be recognised as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(pub u32);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen#{}", self.0)
    }
}

/// Which end of a session a location fix belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixPhase {
    Start,
    End,
}

/// Tag attached to every location request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixTicket {
    pub generation: Generation,
    pub phase: FixPhase,
}

/// Distance covered by a finished session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Distance in meters, rounded to two decimals
    pub distance_m: f64,
    /// Tire rotations, rounded to two decimals (rotation mode only)
    pub rotations: Option<f64>,
}

/// One activation of a measurement mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementSession {
    pub generation: Generation,
    pub mode: MeasurementMode,
    pub start: Option<Coordinate>,
    pub end: Option<Coordinate>,
    /// Start fix requested but not yet resolved
    pub start_pending: bool,
}

impl MeasurementSession {
    pub fn new(generation: Generation, mode: MeasurementMode) -> Self {
        Self {
            generation,
            mode,
            start: None,
            end: None,
            start_pending: true,
        }
    }

    /// Ticket for a fix belonging to this session
    pub fn ticket(&self, phase: FixPhase) -> FixTicket {
        FixTicket {
            generation: self.generation,
            phase,
        }
    }

    /// Compute the covered distance
    ///
    /// Returns `None` until both coordinates are known. Rotations are only
    /// reported for `Rotation` sessions with a calibration.
    ///
    /// # Arguments
    ///
    /// * `meters_per_rotation` - Travel per tire rotation, `None` disables counting
    pub fn measure(&self, meters_per_rotation: Option<f64>) -> Option<Measurement> {
        let (start, end) = (self.start?, self.end?);
        let distance = start.distance_to(&end);

        let rotations = match (self.mode, meters_per_rotation) {
            (MeasurementMode::Rotation, Some(per)) if per > 0.0 => {
                Some(round_centi(distance / per))
            }
            _ => None,
        };

        Some(Measurement {
            distance_m: round_centi(distance),
            rotations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_default_is_idle() {
        assert_eq!(MeasurementMode::default(), MeasurementMode::Idle);
        assert!(MeasurementMode::Idle.is_idle());
        assert!(!MeasurementMode::Rotation.is_idle());
    }

    #[test]
    fn test_generation_next() {
        assert_eq!(Generation(0).next(), Generation(1));
        assert_eq!(Generation(u32::MAX).next(), Generation(0));
    }

    #[test]
    fn test_session_without_end_has_no_measurement() {
        let mut session = MeasurementSession::new(Generation(1), MeasurementMode::Distance);
        session.start = Some(Coordinate::new(0.0, 0.0));
        assert!(session.measure(Some(10.0)).is_none());
    }

    #[test]
    fn test_session_without_start_has_no_measurement() {
        let mut session = MeasurementSession::new(Generation(1), MeasurementMode::Distance);
        session.end = Some(Coordinate::new(0.0, 0.0));
        assert!(session.measure(None).is_none());
    }

    #[test]
    fn test_rotation_session_counts_rotations() {
        let mut session = MeasurementSession::new(Generation(3), MeasurementMode::Rotation);
        session.start = Some(Coordinate::new(0.0, 0.0));
        session.end = Some(Coordinate::new(0.0, 0.0000899));

        let m = session.measure(Some(10.0)).unwrap();
        assert!((m.distance_m - 10.0).abs() < 0.005);
        assert_eq!(m.rotations, Some(1.0));
    }

    #[test]
    fn test_distance_session_has_no_rotations() {
        let mut session = MeasurementSession::new(Generation(3), MeasurementMode::Distance);
        session.start = Some(Coordinate::new(0.0, 0.0));
        session.end = Some(Coordinate::new(0.0, 0.0000899));

        let m = session.measure(Some(10.0)).unwrap();
        assert!(m.rotations.is_none());
    }

    #[test]
    fn test_rotation_session_without_calibration() {
        let mut session = MeasurementSession::new(Generation(3), MeasurementMode::Rotation);
        session.start = Some(Coordinate::new(0.0, 0.0));
        session.end = Some(Coordinate::new(0.0, 0.0000899));

        assert!(session.measure(None).unwrap().rotations.is_none());
        assert!(session.measure(Some(0.0)).unwrap().rotations.is_none());
    }

    #[test]
    fn test_ticket_carries_generation() {
        let session = MeasurementSession::new(Generation(7), MeasurementMode::AngledWalk);
        let ticket = session.ticket(FixPhase::End);
        assert_eq!(ticket.generation, Generation(7));
        assert_eq!(ticket.phase, FixPhase::End);
    }
}

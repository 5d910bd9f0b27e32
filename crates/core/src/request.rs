//! Collaborator request settings
//!
//! Platform-agnostic settings passed to the location provider and the
//! orientation sensor. Stored as integer parameters.

/// Requested GPS accuracy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationAccuracy {
    Lowest,
    Low,
    Medium,
    High,
    #[default]
    Best,
}

impl LocationAccuracy {
    /// Nominal horizontal accuracy in meters
    pub fn nominal_radius_m(&self) -> f64 {
        match self {
            LocationAccuracy::Lowest => 3000.0,
            LocationAccuracy::Low => 1000.0,
            LocationAccuracy::Medium => 100.0,
            LocationAccuracy::High => 10.0,
            LocationAccuracy::Best => 1.0,
        }
    }

    pub fn from_param(value: i32) -> Option<Self> {
        match value {
            0 => Some(LocationAccuracy::Lowest),
            1 => Some(LocationAccuracy::Low),
            2 => Some(LocationAccuracy::Medium),
            3 => Some(LocationAccuracy::High),
            4 => Some(LocationAccuracy::Best),
            _ => None,
        }
    }

    pub fn as_param(&self) -> i32 {
        *self as i32
    }
}

/// Requested orientation sensor update rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorSpeed {
    #[default]
    Default,
    /// Rate suitable for updating a user interface
    Ui,
    /// Rate suitable for games
    Game,
    /// As fast as the hardware allows
    Fastest,
}

impl SensorSpeed {
    /// Nominal interval between samples in milliseconds
    pub fn interval_ms(&self) -> u64 {
        match self {
            SensorSpeed::Default => 200,
            SensorSpeed::Ui => 60,
            SensorSpeed::Game => 20,
            SensorSpeed::Fastest => 5,
        }
    }

    pub fn from_param(value: i32) -> Option<Self> {
        match value {
            0 => Some(SensorSpeed::Default),
            1 => Some(SensorSpeed::Ui),
            2 => Some(SensorSpeed::Game),
            3 => Some(SensorSpeed::Fastest),
            _ => None,
        }
    }

    pub fn as_param(&self) -> i32 {
        *self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_param_round_trip() {
        for value in 0..5 {
            let accuracy = LocationAccuracy::from_param(value).unwrap();
            assert_eq!(accuracy.as_param(), value);
        }
        assert!(LocationAccuracy::from_param(5).is_none());
        assert!(LocationAccuracy::from_param(-1).is_none());
    }

    #[test]
    fn test_speed_param_round_trip() {
        for value in 0..4 {
            let speed = SensorSpeed::from_param(value).unwrap();
            assert_eq!(speed.as_param(), value);
        }
        assert!(SensorSpeed::from_param(4).is_none());
    }

    #[test]
    fn test_faster_speeds_have_shorter_intervals() {
        assert!(SensorSpeed::Fastest.interval_ms() < SensorSpeed::Game.interval_ms());
        assert!(SensorSpeed::Game.interval_ms() < SensorSpeed::Ui.interval_ms());
        assert!(SensorSpeed::Ui.interval_ms() < SensorSpeed::Default.interval_ms());
    }
}

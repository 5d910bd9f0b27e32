//! User commands accepted by the measurement state machine

use core::fmt;

use super::state::MeasurementMode;

/// Start or stop request for one measurement mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    StartDistance,
    StopDistance,
    StartRotation,
    StopRotation,
    StartAngledWalk,
    StopAngledWalk,
}

impl Command {
    /// Start command for `mode`, `None` for `Idle`
    pub fn start(mode: MeasurementMode) -> Option<Self> {
        match mode {
            MeasurementMode::Idle => None,
            MeasurementMode::Distance => Some(Command::StartDistance),
            MeasurementMode::Rotation => Some(Command::StartRotation),
            MeasurementMode::AngledWalk => Some(Command::StartAngledWalk),
        }
    }

    /// Stop command for `mode`, `None` for `Idle`
    pub fn stop(mode: MeasurementMode) -> Option<Self> {
        match mode {
            MeasurementMode::Idle => None,
            MeasurementMode::Distance => Some(Command::StopDistance),
            MeasurementMode::Rotation => Some(Command::StopRotation),
            MeasurementMode::AngledWalk => Some(Command::StopAngledWalk),
        }
    }

    /// Mode this command targets
    pub fn mode(&self) -> MeasurementMode {
        match self {
            Command::StartDistance | Command::StopDistance => MeasurementMode::Distance,
            Command::StartRotation | Command::StopRotation => MeasurementMode::Rotation,
            Command::StartAngledWalk | Command::StopAngledWalk => MeasurementMode::AngledWalk,
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(
            self,
            Command::StartDistance | Command::StartRotation | Command::StartAngledWalk
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.is_start() { "Start" } else { "Stop" };
        write!(f, "{}{}", verb, self.mode().name())
    }
}

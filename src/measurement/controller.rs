//! Measurement mode controller
//!
//! Synchronous state machine owning the measurement mode, the active
//! session and the latest orientation. It never performs I/O: transitions
//! that need a GPS fix return a [`FixRequest`] and the caller feeds the
//! result back through [`ModeController::apply_fix`].
//!
//! # Sessions
//!
//! Each activation opens a session tagged with a fresh [`Generation`]. A stop
//! moves the session into a closing slot and returns the mode to `Idle` right
//! away; the session is destroyed once its end fix has been applied. Fixes
//! whose generation no longer owns a session are discarded.

use tire_torture_core::{
    quaternion_to_euler, AcceptanceWindow, Command, Coordinate, EulerAngles, FixPhase, FixTicket,
    Generation, LocationAccuracy, MeasurementMode, MeasurementParams, MeasurementSession,
    Quaternion,
};

use super::display::{DisplayUpdate, DRIFT_ABORT, MISSING_START, START_PERMISSION_DENIED};
use super::error::{LocationError, MeasurementError, SensorError};
use crate::{log_debug, log_error, log_info, log_trace, log_warn};

/// Location fix the caller must obtain and hand back
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixRequest {
    pub ticket: FixTicket,
    pub accuracy: LocationAccuracy,
}

/// Outcome of a processed input
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub update: DisplayUpdate,
    pub fix: Option<FixRequest>,
}

/// Measurement state machine
#[derive(Debug)]
pub struct ModeController {
    params: MeasurementParams,
    window: AcceptanceWindow,
    meters_per_rotation: Option<f64>,
    mode: MeasurementMode,
    active: Option<MeasurementSession>,
    closing: Option<MeasurementSession>,
    generation: Generation,
    angles: EulerAngles,
}

impl ModeController {
    pub fn new(params: MeasurementParams) -> Self {
        Self {
            window: params.acceptance_window(),
            meters_per_rotation: params.rotation_calibration(),
            params,
            mode: MeasurementMode::Idle,
            active: None,
            closing: None,
            generation: Generation::default(),
            angles: EulerAngles::default(),
        }
    }

    pub fn params(&self) -> &MeasurementParams {
        &self.params
    }

    pub fn mode(&self) -> MeasurementMode {
        self.mode
    }

    /// Latest converted orientation (zero until the first sample)
    pub fn angles(&self) -> EulerAngles {
        self.angles
    }

    pub fn acceptance_window(&self) -> AcceptanceWindow {
        self.window
    }

    /// Session of the active mode
    pub fn session(&self) -> Option<&MeasurementSession> {
        self.active.as_ref()
    }

    /// Stopped session still waiting for its end fix
    pub fn closing_session(&self) -> Option<&MeasurementSession> {
        self.closing.as_ref()
    }

    /// Generation of the most recent activation
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Command a single per-mode toggle button should issue right now
    pub fn toggle_command(&self, mode: MeasurementMode) -> Option<Command> {
        if self.mode == mode {
            Command::stop(mode)
        } else {
            Command::start(mode)
        }
    }

    /// Process a user command
    ///
    /// # Errors
    ///
    /// - `ModeConflict` for anything but the active mode's own stop command
    ///   (including stop commands while idle)
    /// - `OrientationOutOfRange` when an angled walk is started outside the
    ///   acceptance window
    ///
    /// The mode is unchanged on error.
    pub fn handle_command(&mut self, command: Command) -> Result<Transition, MeasurementError> {
        match self.mode {
            MeasurementMode::Idle if command.is_start() => {
                let mode = command.mode();
                if mode == MeasurementMode::AngledWalk && !self.window.contains(self.angles.roll) {
                    log_warn!(
                        "{} rejected: roll {:.3} outside [{}, {}]",
                        command,
                        self.angles.roll,
                        self.window.low,
                        self.window.high
                    );
                    return Err(MeasurementError::OrientationOutOfRange {
                        roll: self.angles.roll,
                        low: self.window.low,
                        high: self.window.high,
                    });
                }
                Ok(self.activate(mode))
            }
            active if Command::stop(active) == Some(command) => {
                let fix = self.deactivate();
                log_info!("{} stopped", active);
                Ok(Transition {
                    update: self.update(),
                    fix,
                })
            }
            active => {
                log_warn!("{} rejected while {} is active", command, active);
                Err(MeasurementError::ModeConflict { active, command })
            }
        }
    }

    /// Process one orientation sample
    ///
    /// During an angled walk a roll outside the acceptance window stops the
    /// walk exactly as `StopAngledWalk` would.
    pub fn handle_orientation_sample(&mut self, quaternion: &Quaternion<f64>) -> Transition {
        self.angles = quaternion_to_euler(quaternion);
        log_trace!(
            "orientation roll={:.3} pitch={:.3} yaw={:.3}",
            self.angles.roll,
            self.angles.pitch,
            self.angles.yaw
        );

        if self.mode == MeasurementMode::AngledWalk && !self.window.contains(self.angles.roll) {
            log_warn!(
                "roll {:.3} drifted outside [{}, {}], aborting angled walk",
                self.angles.roll,
                self.window.low,
                self.window.high
            );
            let fix = self.deactivate();
            return Transition {
                update: self.update().with_status(DRIFT_ABORT),
                fix,
            };
        }

        Transition {
            update: self.update(),
            fix: None,
        }
    }

    /// Process a failed sensor read
    ///
    /// The failure is reported; an angled walk cannot be validated without
    /// the sensor and is aborted.
    pub fn handle_sensor_error(&mut self, error: SensorError) -> Transition {
        log_error!("orientation sensor failed: {:?}", error);
        let status = MeasurementError::from(error).to_string();

        let fix = if self.mode == MeasurementMode::AngledWalk {
            log_warn!("aborting angled walk without orientation");
            self.deactivate()
        } else {
            None
        };

        Transition {
            update: self.update().with_status(status),
            fix,
        }
    }

    /// Apply a resolved location fix
    ///
    /// Returns `None` when the fix is stale, i.e. its generation no longer
    /// owns an active or closing session.
    pub fn apply_fix(
        &mut self,
        ticket: FixTicket,
        result: Result<Coordinate, LocationError>,
    ) -> Option<DisplayUpdate> {
        match ticket.phase {
            FixPhase::Start => self.apply_start_fix(ticket.generation, result),
            FixPhase::End => self.apply_end_fix(ticket.generation, result),
        }
    }

    fn apply_start_fix(
        &mut self,
        generation: Generation,
        result: Result<Coordinate, LocationError>,
    ) -> Option<DisplayUpdate> {
        let owns = |slot: &Option<MeasurementSession>| {
            slot.as_ref().is_some_and(|s| s.generation == generation)
        };
        let closing = !owns(&self.active) && owns(&self.closing);
        let slot = if closing {
            self.closing.as_mut()
        } else if owns(&self.active) {
            self.active.as_mut()
        } else {
            None
        };
        let Some(session) = slot.filter(|s| s.start_pending) else {
            log_debug!("discarding stale start fix for {}", generation);
            return None;
        };
        session.start_pending = false;

        let mut update = match result {
            Ok(start) => {
                session.start = Some(start);
                log_info!(
                    "{} start fix {:.6},{:.6}",
                    generation,
                    start.latitude,
                    start.longitude
                );
                self.update().with_start(&start)
            }
            Err(error) => {
                log_error!("{} start fix failed: {:?}", generation, error);
                let mut update = self.update().with_status(start_fix_status(error));
                update.distance = Some(MISSING_START.to_string());
                update
            }
        };

        // End fix already in: the session can be measured now
        if closing && self.closing.as_ref().is_some_and(|s| s.end.is_some()) {
            if let Some(session) = self.closing.take() {
                update = self.finish(session, update);
            }
        }

        Some(update)
    }

    fn apply_end_fix(
        &mut self,
        generation: Generation,
        result: Result<Coordinate, LocationError>,
    ) -> Option<DisplayUpdate> {
        let mut session = match self.closing.take() {
            Some(session) if session.generation == generation && session.end.is_none() => {
                session
            }
            other => {
                self.closing = other;
                log_debug!("discarding stale end fix for {}", generation);
                return None;
            }
        };

        let mut update = self.update();
        match result {
            Ok(end) => {
                session.end = Some(end);
                update = update.with_end(&end);
                if session.start_pending {
                    log_debug!("{} end fix arrived before its start fix", generation);
                    self.closing = Some(session);
                } else {
                    update = self.finish(session, update);
                }
            }
            Err(error) => {
                log_error!("{} end fix failed: {:?}", generation, error);
                update = update.with_status(MeasurementError::from(error).to_string());
            }
        }

        Some(update)
    }

    /// Report the measurement of a session whose fixes have all resolved
    fn finish(&self, session: MeasurementSession, mut update: DisplayUpdate) -> DisplayUpdate {
        match session.measure(self.meters_per_rotation) {
            Some(measurement) => {
                log_info!(
                    "{} {} finished: {:.2} m, rotations {:?}",
                    session.generation,
                    session.mode,
                    measurement.distance_m,
                    measurement.rotations
                );
                update.with_measurement(measurement)
            }
            None => {
                log_warn!("{} finished without a start fix", session.generation);
                update.distance = Some(MISSING_START.to_string());
                update
            }
        }
    }

    fn activate(&mut self, mode: MeasurementMode) -> Transition {
        if let Some(stale) = self.closing.take() {
            log_debug!("{} superseded before its end fix", stale.generation);
        }

        self.generation = self.generation.next();
        let session = MeasurementSession::new(self.generation, mode);
        let fix = FixRequest {
            ticket: session.ticket(FixPhase::Start),
            accuracy: self.params.location_accuracy,
        };
        self.active = Some(session);
        self.mode = mode;
        log_info!("{} started ({})", mode, self.generation);

        Transition {
            update: self.update().with_reset(),
            fix: Some(fix),
        }
    }

    fn deactivate(&mut self) -> Option<FixRequest> {
        self.mode = MeasurementMode::Idle;
        let session = self.active.take()?;
        let fix = FixRequest {
            ticket: session.ticket(FixPhase::End),
            accuracy: self.params.location_accuracy,
        };
        self.closing = Some(session);
        Some(fix)
    }

    fn update(&self) -> DisplayUpdate {
        DisplayUpdate::new(self.mode, self.angles)
    }
}

/// Status text for a failed start fix
///
/// A denied permission reads differently at the start of a walk.
fn start_fix_status(error: LocationError) -> String {
    match error {
        LocationError::PermissionDenied => START_PERMISSION_DENIED.to_string(),
        other => MeasurementError::from(other).to_string(),
    }
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new(MeasurementParams::default())
    }
}

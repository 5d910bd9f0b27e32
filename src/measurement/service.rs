//! Async measurement service
//!
//! Wraps the synchronous [`ModeController`] and drives the collaborators it
//! asks for. The controller lock is never held across an await, so commands
//! and sensor samples keep flowing while a location fix is outstanding.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tire_torture_core::{
    Command, EulerAngles, MeasurementMode, MeasurementParams, MeasurementSession, Quaternion,
};
use tokio::sync::mpsc;

use super::controller::{FixRequest, ModeController, Transition};
use super::display::DisplayUpdate;
use super::error::{MeasurementError, SensorError};
use crate::platform::traits::{LocationProvider, OrientationSensor};
use crate::{log_debug, log_info, log_warn};

/// Shared handle to a measurement controller and its location provider
pub struct MeasurementService<L: LocationProvider + ?Sized> {
    controller: Arc<Mutex<ModeController>>,
    location: Arc<L>,
}

impl<L: LocationProvider + ?Sized> Clone for MeasurementService<L> {
    fn clone(&self) -> Self {
        Self {
            controller: Arc::clone(&self.controller),
            location: Arc::clone(&self.location),
        }
    }
}

impl<L: LocationProvider + ?Sized> MeasurementService<L> {
    pub fn new(params: MeasurementParams, location: Arc<L>) -> Self {
        log_info!("measurement service using location provider {}", location.name());
        Self {
            controller: Arc::new(Mutex::new(ModeController::new(params))),
            location,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ModeController> {
        self.controller
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn mode(&self) -> MeasurementMode {
        self.lock().mode()
    }

    pub fn angles(&self) -> EulerAngles {
        self.lock().angles()
    }

    pub fn session(&self) -> Option<MeasurementSession> {
        self.lock().session().copied()
    }

    pub fn closing_session(&self) -> Option<MeasurementSession> {
        self.lock().closing_session().copied()
    }

    /// Process a user command and resolve the fix it requires
    ///
    /// The returned update combines the immediate transition with the
    /// outcome of the fix, unless the fix went stale in the meantime.
    pub async fn handle_command(
        &self,
        command: Command,
    ) -> Result<DisplayUpdate, MeasurementError> {
        let transition = self.lock().handle_command(command)?;
        Ok(self.complete(transition).await)
    }

    /// Issue whatever command the per-mode toggle button stands for
    pub async fn toggle(&self, mode: MeasurementMode) -> Result<DisplayUpdate, MeasurementError> {
        let command = self.lock().toggle_command(mode);
        match command {
            Some(command) => self.handle_command(command).await,
            None => {
                log_debug!("no toggle command for {}", mode);
                Ok(self.current())
            }
        }
    }

    pub async fn handle_orientation_sample(&self, quaternion: &Quaternion<f64>) -> DisplayUpdate {
        let transition = self.lock().handle_orientation_sample(quaternion);
        self.complete(transition).await
    }

    pub async fn handle_sensor_error(&self, error: SensorError) -> DisplayUpdate {
        let transition = self.lock().handle_sensor_error(error);
        self.complete(transition).await
    }

    fn current(&self) -> DisplayUpdate {
        let controller = self.lock();
        DisplayUpdate::new(controller.mode(), controller.angles())
    }

    async fn complete(&self, transition: Transition) -> DisplayUpdate {
        let Transition { mut update, fix } = transition;
        if let Some(request) = fix {
            if let Some(later) = self.resolve(request).await {
                update.merge(later);
            }
        }
        update
    }

    async fn resolve(&self, request: FixRequest) -> Option<DisplayUpdate> {
        let result = self.location.request_fix(request.accuracy).await;
        self.lock().apply_fix(request.ticket, result)
    }
}

impl<L: LocationProvider + ?Sized + 'static> MeasurementService<L> {
    /// Feed orientation readings into the controller until the sensor ends
    ///
    /// Every processed reading sends one update. Fixes triggered by a reading
    /// (an angled walk drifting out of its window) resolve on their own task
    /// and send a follow-up update, so the sensor loop never waits on GPS.
    /// Returns early once the receiver is dropped.
    ///
    /// # Errors
    ///
    /// `SensorUnavailable` when the sensor cannot be started; the failure
    /// is also sent as a status update.
    pub async fn run_sensor<S: OrientationSensor>(
        &self,
        mut sensor: S,
        updates: mpsc::UnboundedSender<DisplayUpdate>,
    ) -> Result<(), MeasurementError> {
        let speed = self.lock().params().sensor_speed;
        if let Err(error) = sensor.start(speed) {
            let transition = self.lock().handle_sensor_error(error.clone());
            self.dispatch(transition, &updates);
            return Err(error.into());
        }
        log_info!("orientation sensor started at {:?}", speed);

        while let Some(reading) = sensor.next_reading().await {
            let transition = {
                let mut controller = self.lock();
                match reading {
                    Ok(quaternion) => controller.handle_orientation_sample(&quaternion),
                    Err(error) => controller.handle_sensor_error(error),
                }
            };
            if !self.dispatch(transition, &updates) {
                log_warn!("display receiver dropped, stopping orientation sensor");
                break;
            }
        }

        sensor.stop();
        log_info!("orientation sensor stopped");
        Ok(())
    }

    fn dispatch(
        &self,
        transition: Transition,
        updates: &mpsc::UnboundedSender<DisplayUpdate>,
    ) -> bool {
        let Transition { update, fix } = transition;
        if let Some(request) = fix {
            let service = self.clone();
            let updates = updates.clone();
            tokio::spawn(async move {
                if let Some(later) = service.resolve(request).await {
                    let _ = updates.send(later);
                }
            });
        }
        updates.send(update).is_ok()
    }
}

//! End-to-end measurement runs against hand-written collaborators

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tire_torture::core::logging::init_test_logging;
use tire_torture::{
    DisplayUpdate, LocationError, LocationProvider, MeasurementError, MeasurementService,
    OrientationSensor, SensorError,
};
use tire_torture_core::mode::offset_by;
use tire_torture_core::orientation::euler_to_quaternion;
use tire_torture_core::{
    Command, Coordinate, LocationAccuracy, MeasurementMode, MeasurementParams, Quaternion,
    SensorSpeed,
};
use tokio::sync::{mpsc, oneshot};

/// Location provider that hands every request to the test
struct ManualLocation {
    requests: mpsc::UnboundedSender<oneshot::Sender<Result<Coordinate, LocationError>>>,
}

#[async_trait]
impl LocationProvider for ManualLocation {
    fn name(&self) -> &str {
        "manual"
    }

    async fn request_fix(&self, _accuracy: LocationAccuracy) -> Result<Coordinate, LocationError> {
        let (tx, rx) = oneshot::channel();
        self.requests
            .send(tx)
            .map_err(|_| LocationError::Unknown("test ended".into()))?;
        rx.await
            .unwrap_or_else(|_| Err(LocationError::Unknown("dropped".into())))
    }
}

/// Location provider walking north a fixed step per request
struct StepLocation {
    next: Mutex<Coordinate>,
    step_m: f64,
}

#[async_trait]
impl LocationProvider for StepLocation {
    fn name(&self) -> &str {
        "step"
    }

    async fn request_fix(&self, _accuracy: LocationAccuracy) -> Result<Coordinate, LocationError> {
        let mut next = self.next.lock().unwrap();
        let fix = *next;
        *next = offset_by(&fix, self.step_m, 0.0);
        Ok(fix)
    }
}

struct ReplaySensor {
    readings: VecDeque<Result<Quaternion<f64>, SensorError>>,
    running: bool,
}

impl ReplaySensor {
    fn rolls(rolls: &[f64]) -> Self {
        Self {
            readings: rolls
                .iter()
                .map(|&r| Ok(euler_to_quaternion(r, 0.0, 0.0)))
                .collect(),
            running: false,
        }
    }
}

#[async_trait]
impl OrientationSensor for ReplaySensor {
    fn start(&mut self, _speed: SensorSpeed) -> Result<(), SensorError> {
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_monitoring(&self) -> bool {
        self.running
    }

    async fn next_reading(&mut self) -> Option<Result<Quaternion<f64>, SensorError>> {
        if !self.running {
            return None;
        }
        self.readings.pop_front()
    }
}

fn step_service(step_m: f64) -> MeasurementService<StepLocation> {
    MeasurementService::new(
        MeasurementParams::default(),
        Arc::new(StepLocation {
            next: Mutex::new(Coordinate::new(48.1, 11.5)),
            step_m,
        }),
    )
}

async fn drain(mut rx: mpsc::UnboundedReceiver<DisplayUpdate>) -> Vec<DisplayUpdate> {
    let mut updates = Vec::new();
    while let Some(update) = rx.recv().await {
        updates.push(update);
    }
    updates
}

#[tokio::test]
async fn test_distance_then_rotation_sessions() {
    init_test_logging();
    let service = step_service(20.0);

    service.handle_command(Command::StartDistance).await.unwrap();
    let distance = service.handle_command(Command::StopDistance).await.unwrap();
    assert_eq!(
        distance.distance.as_deref(),
        Some("20.00 meters have been covered!")
    );

    let started = service.handle_command(Command::StartRotation).await.unwrap();
    assert!(started.reset);
    let rotation = service.handle_command(Command::StopRotation).await.unwrap();
    assert_eq!(
        rotation.rotations.as_deref(),
        Some("2.00 rotations have occurred!")
    );
    assert_eq!(service.mode(), MeasurementMode::Idle);
}

#[tokio::test]
async fn test_stop_without_session_is_conflict() {
    init_test_logging();
    let service = step_service(1.0);

    let err = service
        .handle_command(Command::StopDistance)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        MeasurementError::ModeConflict {
            active: MeasurementMode::Idle,
            command: Command::StopDistance
        }
    ));
}

#[tokio::test]
async fn test_angled_walk_requires_window() {
    init_test_logging();
    let service = step_service(3.0);

    let err = service
        .handle_command(Command::StartAngledWalk)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "The Euler Angle needs to be between 0.4 and 0.95"
    );
    assert_eq!(service.mode(), MeasurementMode::Idle);

    service
        .handle_orientation_sample(&euler_to_quaternion(0.5, 0.0, 0.0))
        .await;
    service
        .handle_command(Command::StartAngledWalk)
        .await
        .unwrap();
    assert_eq!(service.mode(), MeasurementMode::AngledWalk);
}

#[tokio::test]
async fn test_sensor_drift_ends_angled_walk() {
    init_test_logging();
    let service = step_service(7.5);
    service
        .handle_orientation_sample(&euler_to_quaternion(0.8, 0.0, 0.0))
        .await;
    service
        .handle_command(Command::StartAngledWalk)
        .await
        .unwrap();

    let (tx, rx) = mpsc::unbounded_channel();
    service
        .run_sensor(ReplaySensor::rolls(&[0.8, 0.6, 1.2, 0.5]), tx)
        .await
        .unwrap();
    let updates = drain(rx).await;

    // One update per reading plus the end fix follow-up
    assert_eq!(updates.len(), 5);
    assert_eq!(updates[2].status.as_deref(), Some("Whoops..."));
    assert_eq!(updates[2].mode, MeasurementMode::Idle);
    assert!(updates
        .iter()
        .any(|u| u.distance.as_deref() == Some("7.50 meters have been covered!")));
    // Samples after the abort no longer stop anything
    assert_eq!(service.mode(), MeasurementMode::Idle);
}

#[tokio::test]
async fn test_late_fix_from_previous_session_is_ignored() {
    init_test_logging();
    let (requests_tx, mut requests) = mpsc::unbounded_channel();
    let service = MeasurementService::new(
        MeasurementParams::default(),
        Arc::new(ManualLocation {
            requests: requests_tx,
        }),
    );
    let a = Coordinate::new(0.0, 0.0);
    let b = offset_by(&a, 50.0, 90.0);

    let start = tokio::spawn({
        let service = service.clone();
        async move { service.handle_command(Command::StartDistance).await }
    });
    let start_fix = requests.recv().await.unwrap();
    assert_eq!(service.mode(), MeasurementMode::Distance);

    // Stop before the start fix returns; the end fix is held back too
    let stop = tokio::spawn({
        let service = service.clone();
        async move { service.handle_command(Command::StopDistance).await }
    });
    let end_fix = requests.recv().await.unwrap();
    assert_eq!(service.mode(), MeasurementMode::Idle);

    // A new session supersedes the one still waiting on its fixes
    let restart = tokio::spawn({
        let service = service.clone();
        async move { service.handle_command(Command::StartRotation).await }
    });
    let restart_fix = requests.recv().await.unwrap();
    restart_fix.send(Ok(b)).unwrap();
    restart.await.unwrap().unwrap();

    start_fix.send(Ok(a)).unwrap();
    end_fix.send(Ok(b)).unwrap();
    let started = start.await.unwrap().unwrap();
    let stopped = stop.await.unwrap().unwrap();

    assert!(started.start_location.is_none());
    assert!(stopped.distance.is_none());
    let session = service.session().unwrap();
    assert_eq!(session.mode, MeasurementMode::Rotation);
    assert_eq!(session.start, Some(b));
}

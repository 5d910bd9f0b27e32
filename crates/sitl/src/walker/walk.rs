//! Simulated walker carrying a phone.
//!
//! The walker leaves the origin at construction time and moves at constant
//! speed along the configured heading. Positions are derived from the tokio
//! clock, so tests can drive the walk with a paused runtime.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tire_torture::{
    log_debug, log_trace, log_warn, LocationError, LocationProvider, OrientationSensor, SensorError,
};
use tire_torture_core::mode::offset_by;
use tire_torture_core::orientation::euler_to_quaternion;
use tire_torture_core::{Coordinate, LocationAccuracy, Quaternion, SensorSpeed};
use tokio::time::{Instant, Interval, MissedTickBehavior};

use super::config::WalkConfig;
use crate::error::SimulatorError;

struct WalkState {
    config: WalkConfig,
    started: Instant,
    rng: Mutex<StdRng>,
    roll: Mutex<f64>,
    requests: AtomicU32,
}

impl WalkState {
    fn origin(&self) -> Coordinate {
        Coordinate::new(self.config.origin_lat_deg, self.config.origin_lon_deg)
    }

    fn distance_walked(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * self.config.speed_mps
    }

    fn position(&self) -> Coordinate {
        offset_by(
            &self.origin(),
            self.distance_walked(),
            self.config.heading_deg,
        )
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn roll(&self) -> f64 {
        *self.roll.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Generate Gaussian noise using Box-Muller transform.
    fn gaussian_noise(&self, stddev: f64) -> f64 {
        if stddev == 0.0 {
            return 0.0;
        }
        let mut rng = self.rng();
        let u1: f64 = rng.gen::<f64>().max(f64::EPSILON);
        let u2: f64 = rng.gen();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        z * stddev
    }
}

/// A walker moving from the origin along a straight line.
///
/// Cloning shares the same walk.
#[derive(Clone)]
pub struct SimulatedWalk {
    state: Arc<WalkState>,
}

impl SimulatedWalk {
    /// Start a walk now.
    pub fn new(config: WalkConfig) -> Result<Self, SimulatorError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let roll = config.roll_rad;
        Ok(Self {
            state: Arc::new(WalkState {
                config,
                started: Instant::now(),
                rng: Mutex::new(rng),
                roll: Mutex::new(roll),
                requests: AtomicU32::new(0),
            }),
        })
    }

    pub fn config(&self) -> &WalkConfig {
        &self.state.config
    }

    /// True position of the walker right now.
    pub fn position(&self) -> Coordinate {
        self.state.position()
    }

    /// Meters walked since the start.
    pub fn distance_walked(&self) -> f64 {
        self.state.distance_walked()
    }

    /// Tilt the phone.
    pub fn set_roll(&self, roll: f64) {
        log_debug!("phone roll set to {:.3}", roll);
        *self.state.roll.lock().unwrap_or_else(PoisonError::into_inner) = roll;
    }

    pub fn roll(&self) -> f64 {
        self.state.roll()
    }

    /// Location requests answered so far, failed ones included.
    pub fn request_count(&self) -> u32 {
        self.state.requests.load(Ordering::Relaxed)
    }

    pub fn location_provider(&self) -> SimLocationProvider {
        SimLocationProvider {
            state: Arc::clone(&self.state),
        }
    }

    pub fn orientation_sensor(&self) -> SimOrientationSensor {
        SimOrientationSensor {
            state: Arc::clone(&self.state),
            interval: None,
        }
    }
}

impl std::fmt::Debug for SimulatedWalk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedWalk")
            .field("config", &self.state.config)
            .field("distance_walked", &self.distance_walked())
            .finish()
    }
}

/// GPS of the simulated phone.
pub struct SimLocationProvider {
    state: Arc<WalkState>,
}

#[async_trait]
impl LocationProvider for SimLocationProvider {
    fn name(&self) -> &str {
        "sim_walk"
    }

    async fn request_fix(&self, accuracy: LocationAccuracy) -> Result<Coordinate, LocationError> {
        let request = self.state.requests.fetch_add(1, Ordering::Relaxed);
        if self.state.config.fix_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.state.config.fix_delay_ms)).await;
        }

        if let Some(failure) = &self.state.config.failure {
            if failure.applies_to(request) {
                log_warn!("injecting {:?} into location request {}", failure.kind, request);
                return Err(failure.kind.to_error());
            }
        }

        let position = self.state.position();
        let north = self.state.gaussian_noise(self.state.config.gps_noise_m);
        let east = self.state.gaussian_noise(self.state.config.gps_noise_m);
        let error_m = north.hypot(east);
        let fix = offset_by(&position, error_m, east.atan2(north).to_degrees());
        log_debug!(
            "location request {} ({:?}): {:.6},{:.6} error {:.2} m",
            request, accuracy, fix.latitude, fix.longitude, error_m
        );
        Ok(fix)
    }
}

/// Orientation sensor of the simulated phone.
pub struct SimOrientationSensor {
    state: Arc<WalkState>,
    interval: Option<Interval>,
}

#[async_trait]
impl OrientationSensor for SimOrientationSensor {
    fn start(&mut self, speed: SensorSpeed) -> Result<(), SensorError> {
        let mut interval = tokio::time::interval(Duration::from_millis(speed.interval_ms()));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.interval = Some(interval);
        log_debug!("orientation sensor started at {} ms", speed.interval_ms());
        Ok(())
    }

    fn stop(&mut self) {
        self.interval = None;
    }

    fn is_monitoring(&self) -> bool {
        self.interval.is_some()
    }

    async fn next_reading(&mut self) -> Option<Result<Quaternion<f64>, SensorError>> {
        self.interval.as_mut()?.tick().await;
        let roll = self.state.roll() + self.state.gaussian_noise(self.state.config.roll_noise_rad);
        let yaw = self.state.config.heading_deg.to_radians();
        log_trace!("orientation reading roll {:.3}", roll);
        Some(Ok(euler_to_quaternion(roll, 0.0, yaw)))
    }
}

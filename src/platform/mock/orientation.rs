//! Mock orientation sensor for testing

use std::collections::VecDeque;

use async_trait::async_trait;
use tire_torture_core::{Quaternion, SensorSpeed};

use crate::measurement::SensorError;
use crate::platform::traits::OrientationSensor;

/// Mock orientation sensor replaying scripted readings
///
/// Readings are only delivered while monitoring. The task yields between
/// readings so commands issued concurrently can interleave.
#[derive(Debug, Default)]
pub struct ScriptedOrientationSensor {
    readings: VecDeque<Result<Quaternion<f64>, SensorError>>,
    start_error: Option<SensorError>,
    monitoring: bool,
    speed: Option<SensorSpeed>,
}

impl ScriptedOrientationSensor {
    pub fn new(readings: impl IntoIterator<Item = Result<Quaternion<f64>, SensorError>>) -> Self {
        Self {
            readings: readings.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Sensor whose `start` always fails with `error`
    pub fn failing(error: SensorError) -> Self {
        Self {
            start_error: Some(error),
            ..Default::default()
        }
    }

    /// Speed passed to the last successful `start`
    pub fn speed(&self) -> Option<SensorSpeed> {
        self.speed
    }

    /// Readings not yet delivered
    pub fn remaining(&self) -> usize {
        self.readings.len()
    }
}

#[async_trait]
impl OrientationSensor for ScriptedOrientationSensor {
    fn start(&mut self, speed: SensorSpeed) -> Result<(), SensorError> {
        if let Some(error) = &self.start_error {
            return Err(error.clone());
        }
        self.monitoring = true;
        self.speed = Some(speed);
        Ok(())
    }

    fn stop(&mut self) {
        self.monitoring = false;
    }

    fn is_monitoring(&self) -> bool {
        self.monitoring
    }

    async fn next_reading(&mut self) -> Option<Result<Quaternion<f64>, SensorError>> {
        if !self.monitoring {
            return None;
        }
        tokio::task::yield_now().await;
        self.readings.pop_front()
    }
}

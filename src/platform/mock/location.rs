//! Mock location providers for testing

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tire_torture_core::{Coordinate, LocationAccuracy};
use tokio::sync::{oneshot, Notify};

use crate::measurement::LocationError;
use crate::platform::traits::LocationProvider;

type FixResult = Result<Coordinate, LocationError>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock location provider answering from a script
///
/// Each request pops the next scripted result immediately. An exhausted
/// script answers `LocationError::Unknown`.
#[derive(Debug, Default)]
pub struct ScriptedLocationProvider {
    responses: Mutex<VecDeque<FixResult>>,
    requests: Mutex<Vec<LocationAccuracy>>,
}

impl ScriptedLocationProvider {
    /// Create a new mock provider with the given responses
    pub fn new(responses: impl IntoIterator<Item = FixResult>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Append a response to the script
    pub fn push(&self, response: FixResult) {
        lock(&self.responses).push_back(response);
    }

    /// Accuracies of all requests received so far
    pub fn requests(&self) -> Vec<LocationAccuracy> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl LocationProvider for ScriptedLocationProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn request_fix(&self, accuracy: LocationAccuracy) -> FixResult {
        lock(&self.requests).push(accuracy);
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(LocationError::Unknown("script exhausted".into())))
    }
}

/// Request held by a [`GatedLocationProvider`] until the test resolves it
#[derive(Debug)]
pub struct PendingFix {
    pub accuracy: LocationAccuracy,
    reply: oneshot::Sender<FixResult>,
}

impl PendingFix {
    /// Complete the request with `result`
    pub fn resolve(self, result: FixResult) {
        // The requester may have gone away; nothing to deliver then
        let _ = self.reply.send(result);
    }
}

/// Mock location provider whose requests stay pending until resolved
///
/// Lets tests control the order in which concurrent fixes complete.
#[derive(Debug, Default)]
pub struct GatedLocationProvider {
    pending: Mutex<VecDeque<PendingFix>>,
    arrived: Notify,
}

impl GatedLocationProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the next request to arrive
    pub async fn next_request(&self) -> PendingFix {
        loop {
            let next = lock(&self.pending).pop_front();
            if let Some(pending) = next {
                return pending;
            }
            self.arrived.notified().await;
        }
    }

    /// Number of requests not yet taken by `next_request`
    pub fn pending_count(&self) -> usize {
        lock(&self.pending).len()
    }
}

#[async_trait]
impl LocationProvider for GatedLocationProvider {
    fn name(&self) -> &str {
        "gated"
    }

    async fn request_fix(&self, accuracy: LocationAccuracy) -> FixResult {
        let (reply, answer) = oneshot::channel();
        lock(&self.pending).push_back(PendingFix { accuracy, reply });
        self.arrived.notify_one();
        answer
            .await
            .unwrap_or_else(|_| Err(LocationError::Unknown("request dropped".into())))
    }
}

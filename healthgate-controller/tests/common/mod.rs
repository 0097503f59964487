//! Fake collaborators for driving the control loop

#![allow(dead_code)]

use async_trait::async_trait;
use healthgate_common::{AbortOutcome, HealthSnapshot, Measurement, OperationState};
use healthgate_controller::{AbortActuator, MonitorError, OperationStatusSource, SnapshotSource};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub fn in_progress(kind: &str) -> OperationState {
    OperationState::from_provisioning_state(Some(kind), Some("\"etag-1\"".to_string()))
}

pub fn settled(state: &str) -> OperationState {
    OperationState::from_provisioning_state(Some(state), None)
}

/// The crashing-pods reading: 12% crashing against a 10% threshold
pub fn unhealthy_snapshot() -> HealthSnapshot {
    [
        (Measurement::CrashingPodsPercent, 12),
        (Measurement::PendingPodsPercent, 5),
        (Measurement::NotReadyNodesPercent, 0),
        (Measurement::FailedJobs, 0),
        (Measurement::RestartCount, 0),
    ]
    .into_iter()
    .collect()
}

pub fn healthy_snapshot() -> HealthSnapshot {
    Measurement::ALL.iter().map(|m| (*m, 0)).collect()
}

/// Replays scripted status results; the last entry repeats forever
pub struct ScriptedStatus {
    script: Mutex<VecDeque<Result<OperationState, String>>>,
    pub calls: AtomicUsize,
}

impl ScriptedStatus {
    pub fn new(script: Vec<Result<OperationState, String>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn always(state: OperationState) -> Self {
        Self::new(vec![Ok(state)])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OperationStatusSource for ScriptedStatus {
    async fn operation_status(&self) -> healthgate_controller::Result<OperationState> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut script = self.script.lock().unwrap();
        let next = if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script.front().cloned().unwrap()
        };
        next.map_err(MonitorError::Internal)
    }
}

pub struct FakeSnapshots {
    snapshot: Option<HealthSnapshot>,
    pub calls: AtomicUsize,
}

impl FakeSnapshots {
    pub fn returning(snapshot: HealthSnapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            snapshot: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotSource for FakeSnapshots {
    async fn collect_snapshot(&self) -> healthgate_controller::Result<HealthSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.snapshot
            .clone()
            .ok_or_else(|| MonitorError::Internal("pods list timed out".to_string()))
    }
}

/// How the fake actuator behaves once called
pub enum AbortBehavior {
    Return(AbortOutcome),
    /// Takes this long, then succeeds
    Slow(Duration),
    /// Never completes
    Hang,
}

pub struct FakeActuator {
    behavior: AbortBehavior,
    pub calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub last_operation: Mutex<Option<OperationState>>,
}

impl FakeActuator {
    pub fn new(behavior: AbortBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            last_operation: Mutex::new(None),
        }
    }

    pub fn returning(outcome: AbortOutcome) -> Self {
        Self::new(AbortBehavior::Return(outcome))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AbortActuator for FakeActuator {
    async fn abort(&self, operation: &OperationState) -> AbortOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_operation.lock().unwrap() = Some(operation.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let outcome = match &self.behavior {
            AbortBehavior::Return(outcome) => outcome.clone(),
            AbortBehavior::Slow(delay) => {
                tokio::time::sleep(*delay).await;
                AbortOutcome::Succeeded
            }
            AbortBehavior::Hang => std::future::pending().await,
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}

//! Health control loop
//!
//! Every poll interval the controller:
//! 1. Queries the managed cluster's operation status
//! 2. If an operation is in flight, collects a health snapshot
//! 3. Evaluates the snapshot against the threshold policy
//! 4. Requests cancellation of the operation on any violation
//!
//! Cycles run strictly one after another. A cycle that overruns the poll
//! interval delays the next tick instead of overlapping it, so at most one
//! abort request is ever in flight.

pub mod status;

use async_trait::async_trait;
use healthgate_common::{AbortOutcome, HealthSnapshot, OperationState, ThresholdPolicy, Violation};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::error::{CycleError, Result};
use crate::evaluator::evaluate;
use crate::shutdown::ShutdownSignal;
pub use status::StatusHandle;

/// Source of the managed cluster's current operation state
#[async_trait]
pub trait OperationStatusSource: Send + Sync {
    async fn operation_status(&self) -> Result<OperationState>;
}

/// Source of cluster health measurements
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn collect_snapshot(&self) -> Result<HealthSnapshot>;
}

/// Cancels the cluster's latest operation
#[async_trait]
pub trait AbortActuator: Send + Sync {
    /// Issue one cancellation request and wait for it to settle.
    ///
    /// The request targets whatever operation is latest on the cluster;
    /// `operation` is the state observed at status-check time and may be used
    /// to make the request conditional.
    async fn abort(&self, operation: &OperationState) -> AbortOutcome;
}

/// Result of one completed cycle
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// No operation in progress; nothing collected
    Idle { raw_status: String },
    /// Operation in progress and every measurement within its threshold
    Healthy { operation: String },
    /// Thresholds exceeded; one cancellation was attempted
    Aborted {
        operation: String,
        violations: Vec<Violation>,
        outcome: AbortOutcome,
    },
}

pub struct Controller {
    status_source: Arc<dyn OperationStatusSource>,
    snapshot_source: Arc<dyn SnapshotSource>,
    actuator: Arc<dyn AbortActuator>,
    policy: Arc<ThresholdPolicy>,
    poll_interval: Duration,
    status: StatusHandle,
}

impl Controller {
    pub fn new(
        status_source: Arc<dyn OperationStatusSource>,
        snapshot_source: Arc<dyn SnapshotSource>,
        actuator: Arc<dyn AbortActuator>,
        policy: ThresholdPolicy,
        poll_interval: Duration,
    ) -> Self {
        let status = StatusHandle::new(poll_interval, policy.clone());

        Self {
            status_source,
            snapshot_source,
            actuator,
            policy: Arc::new(policy),
            poll_interval,
            status,
        }
    }

    /// Handle for reading the controller's status from other tasks
    pub fn status(&self) -> StatusHandle {
        self.status.clone()
    }

    /// Run the control loop until `shutdown` fires.
    ///
    /// The first check happens one poll interval after start. A shutdown
    /// during a cycle drops the cycle at its current await point, which
    /// cancels any outstanding request.
    pub async fn run(&self, shutdown: ShutdownSignal) {
        info!(
            poll_interval = ?self.poll_interval,
            thresholds = ?self.policy,
            "Starting health monitor"
        );

        let Some(first_tick) = Instant::now().checked_add(self.poll_interval) else {
            error!(poll_interval = ?self.poll_interval, "Poll interval out of range, monitor not started");
            self.status.set_shutting_down().await;
            return;
        };
        let mut ticker = interval_at(first_tick, self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let result = tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    info!("Shutdown requested during health check, abandoning cycle");
                    break;
                }
                result = self.check_health() => result,
            };

            if let Err(e) = &result {
                error!(error = %e, "Health check failed");
            }
            self.status.record_cycle(&result).await;
        }

        self.status.set_shutting_down().await;
        info!("Health monitor stopped");
    }

    /// Run a single cycle: status, snapshot, evaluation, and at most one abort
    pub async fn check_health(&self) -> std::result::Result<CycleOutcome, CycleError> {
        let operation = self
            .status_source
            .operation_status()
            .await
            .map_err(CycleError::Status)?;

        let newly_detected = self.status.track_operation(&operation).await;

        if !operation.in_progress {
            debug!(status = %operation.raw_status, "No operation in progress");
            return Ok(CycleOutcome::Idle {
                raw_status: operation.raw_status,
            });
        }

        if newly_detected {
            info!(operation = %operation.kind, "Operation in progress, monitoring cluster health");
        } else {
            debug!(operation = %operation.kind, "Operation still in progress");
        }

        let snapshot = self
            .snapshot_source
            .collect_snapshot()
            .await
            .map_err(CycleError::Snapshot)?;

        let violations = evaluate(&snapshot, &self.policy);
        if violations.is_empty() {
            debug!(
                operation = %operation.kind,
                measurements = snapshot.len(),
                "Cluster healthy"
            );
            return Ok(CycleOutcome::Healthy {
                operation: operation.kind,
            });
        }

        for v in &violations {
            warn!(
                operation = %operation.kind,
                measurement = %v.measurement,
                observed = v.observed,
                threshold = v.threshold,
                "Health threshold exceeded"
            );
        }
        warn!(
            operation = %operation.kind,
            violations = violations.len(),
            "Aborting operation due to health check failures"
        );

        let outcome = self.actuator.abort(&operation).await;
        match &outcome {
            AbortOutcome::Succeeded => {
                info!(operation = %operation.kind, outcome = %outcome, "Aborted operation");
            }
            AbortOutcome::TooLate => {
                info!(
                    operation = %operation.kind,
                    outcome = %outcome,
                    "Operation completed before the abort took effect"
                );
            }
            AbortOutcome::Failed(reason) => {
                error!(operation = %operation.kind, reason = %reason, "Failed to abort operation");
            }
        }

        Ok(CycleOutcome::Aborted {
            operation: operation.kind,
            violations,
            outcome,
        })
    }
}

//! Shared, lock-guarded controller status

use chrono::Utc;
use healthgate_common::{
    AbortOutcome, AbortRecord, LoopState, OperationState, StatusReport, ThresholdPolicy,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use super::CycleOutcome;
use crate::error::CycleError;

struct StatusState {
    report: StatusReport,
    /// Error from the most recent operation status query, if it failed
    status_query_error: Option<String>,
}

/// Handle through which the loop publishes status and readers observe it.
///
/// Every read returns a consistent copy; writers hold the lock only for the
/// duration of a field update.
#[derive(Clone)]
pub struct StatusHandle {
    inner: Arc<RwLock<StatusState>>,
}

impl StatusHandle {
    pub fn new(poll_interval: Duration, thresholds: ThresholdPolicy) -> Self {
        let report = StatusReport {
            operation_in_progress: false,
            current_operation: String::new(),
            poll_interval_secs: poll_interval.as_secs_f64(),
            thresholds,
            state: LoopState::Idle,
            cycles: 0,
            aborts_attempted: 0,
            last_cycle_at: None,
            last_error: None,
            last_violations: Vec::new(),
            last_abort: None,
        };

        Self {
            inner: Arc::new(RwLock::new(StatusState {
                report,
                status_query_error: None,
            })),
        }
    }

    pub async fn report(&self) -> StatusReport {
        self.inner.read().await.report.clone()
    }

    /// `Err(reason)` while shutting down or after a failed status query
    pub async fn readiness(&self) -> Result<(), String> {
        let state = self.inner.read().await;
        if state.report.state == LoopState::ShuttingDown {
            return Err("shutting down".to_string());
        }
        match &state.status_query_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    /// Mirror a freshly observed operation state.
    ///
    /// Returns true when this observation starts a new monitoring episode.
    pub(crate) async fn track_operation(&self, operation: &OperationState) -> bool {
        let mut state = self.inner.write().await;
        let report = &mut state.report;

        let newly_detected = operation.in_progress
            && (!report.operation_in_progress || report.current_operation != operation.kind);

        report.operation_in_progress = operation.in_progress;
        if operation.in_progress {
            report.current_operation = operation.kind.clone();
            report.state = LoopState::Monitoring;
        } else {
            report.current_operation.clear();
            report.state = LoopState::Idle;
            report.last_violations.clear();
        }

        newly_detected
    }

    /// Record the result of a completed cycle
    pub(crate) async fn record_cycle(&self, result: &Result<CycleOutcome, CycleError>) {
        let mut state = self.inner.write().await;
        let now = Utc::now();

        state.report.cycles += 1;
        state.report.last_cycle_at = Some(now);
        state.status_query_error = None;

        match result {
            Ok(CycleOutcome::Idle { .. }) => {
                state.report.last_error = None;
            }
            Ok(CycleOutcome::Healthy { .. }) => {
                state.report.last_error = None;
                state.report.last_violations.clear();
            }
            Ok(CycleOutcome::Aborted {
                operation,
                violations,
                outcome,
            }) => {
                state.report.aborts_attempted += 1;
                state.report.last_violations = violations.clone();
                state.report.last_abort = Some(AbortRecord {
                    at: now,
                    operation: operation.clone(),
                    outcome: outcome.clone(),
                });
                state.report.last_error = match outcome {
                    AbortOutcome::Failed(reason) => Some(format!("abort failed: {}", reason)),
                    _ => None,
                };
            }
            Err(e) => {
                if e.is_status_failure() {
                    state.status_query_error = Some(e.to_string());
                }
                state.report.last_error = Some(e.to_string());
            }
        }
    }

    pub(crate) async fn set_shutting_down(&self) {
        self.inner.write().await.report.state = LoopState::ShuttingDown;
    }
}

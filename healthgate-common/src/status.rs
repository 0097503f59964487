//! Controller status as exposed to operators

use crate::{AbortOutcome, ThresholdPolicy, Violation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Control loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoopState {
    /// No operation tracked
    #[default]
    Idle,
    /// Operation in progress, evaluated every tick
    Monitoring,
    ShuttingDown,
}

/// Most recent abort attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbortRecord {
    pub at: DateTime<Utc>,
    pub operation: String,
    pub outcome: AbortOutcome,
}

/// Read-only status report served on `/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub operation_in_progress: bool,
    pub current_operation: String,
    pub poll_interval_secs: f64,
    pub thresholds: ThresholdPolicy,
    pub state: LoopState,
    pub cycles: u64,
    pub aborts_attempted: u64,
    pub last_cycle_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    #[serde(default)]
    pub last_violations: Vec<Violation>,
    pub last_abort: Option<AbortRecord>,
}

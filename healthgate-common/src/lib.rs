//! Common types shared between healthgate-controller and healthgate-cli

pub mod health;
pub mod policy;
pub mod status;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use health::{LivenessResponse, ReadinessResponse};
pub use policy::{PolicyError, ThresholdPolicy};
pub use status::{AbortRecord, LoopState, StatusReport};

/// Named health measurement kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Measurement {
    CrashingPodsPercent,
    PendingPodsPercent,
    NotReadyNodesPercent,
    FailedJobs,
    RestartCount,
    CpuUsagePercent,
    MemoryUsagePercent,
}

impl Measurement {
    pub const ALL: [Measurement; 7] = [
        Measurement::CrashingPodsPercent,
        Measurement::PendingPodsPercent,
        Measurement::NotReadyNodesPercent,
        Measurement::FailedJobs,
        Measurement::RestartCount,
        Measurement::CpuUsagePercent,
        Measurement::MemoryUsagePercent,
    ];

    /// Configuration key, as used in YAML files and status output
    pub fn as_str(&self) -> &'static str {
        match self {
            Measurement::CrashingPodsPercent => "crashingPodsPercent",
            Measurement::PendingPodsPercent => "pendingPodsPercent",
            Measurement::NotReadyNodesPercent => "notReadyNodesPercent",
            Measurement::FailedJobs => "failedJobs",
            Measurement::RestartCount => "restartCount",
            Measurement::CpuUsagePercent => "cpuUsagePercent",
            Measurement::MemoryUsagePercent => "memoryUsagePercent",
        }
    }

    /// Whether the measurement is a percentage (bounded to [0,100] in policies)
    pub fn is_percent(&self) -> bool {
        matches!(
            self,
            Measurement::CrashingPodsPercent
                | Measurement::PendingPodsPercent
                | Measurement::NotReadyNodesPercent
                | Measurement::CpuUsagePercent
                | Measurement::MemoryUsagePercent
        )
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single named reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthMeasurement {
    pub name: Measurement,
    pub value: u64,
}

impl HealthMeasurement {
    pub fn new(name: Measurement, value: u64) -> Self {
        Self { name, value }
    }
}

/// Point-in-time set of measurements.
///
/// A name appears at most once; a missing name means the measurement was not
/// taken this cycle, not that it read zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    measurements: Vec<HealthMeasurement>,
}

impl HealthSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reading. A repeated name replaces the earlier value in place.
    pub fn record(&mut self, name: Measurement, value: u64) {
        match self.measurements.iter_mut().find(|m| m.name == name) {
            Some(existing) => existing.value = value,
            None => self.measurements.push(HealthMeasurement::new(name, value)),
        }
    }

    pub fn extend(&mut self, other: HealthSnapshot) {
        for m in other.measurements {
            self.record(m.name, m.value);
        }
    }

    pub fn get(&self, name: Measurement) -> Option<u64> {
        self.measurements
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HealthMeasurement> {
        self.measurements.iter()
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}

impl FromIterator<(Measurement, u64)> for HealthSnapshot {
    fn from_iter<I: IntoIterator<Item = (Measurement, u64)>>(iter: I) -> Self {
        let mut snapshot = HealthSnapshot::new();
        for (name, value) in iter {
            snapshot.record(name, value);
        }
        snapshot
    }
}

/// A measurement that strictly exceeded its threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub measurement: Measurement,
    pub observed: u64,
    pub threshold: u64,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} > {}", self.measurement, self.observed, self.threshold)
    }
}

/// Current operation state of the managed cluster, recomputed every cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationState {
    pub in_progress: bool,
    /// Operation name (the raw provisioning state while in progress, else empty)
    pub kind: String,
    pub raw_status: String,
    /// Resource version captured with the status, used for conditional aborts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl OperationState {
    /// Map a provisioning state to an operation state.
    ///
    /// Unknown states are treated as not in progress.
    pub fn from_provisioning_state(state: Option<&str>, etag: Option<String>) -> Self {
        let raw_status = state.unwrap_or_default().to_string();
        let in_progress = matches!(
            raw_status.as_str(),
            "Upgrading" | "Updating" | "Scaling" | "Creating" | "Deleting"
        );

        Self {
            in_progress,
            kind: if in_progress { raw_status.clone() } else { String::new() },
            raw_status,
            etag,
        }
    }
}

/// Result of a cancellation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "camelCase")]
pub enum AbortOutcome {
    Succeeded,
    /// The operation finished before the cancellation landed
    TooLate,
    Failed(String),
}

impl fmt::Display for AbortOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortOutcome::Succeeded => f.write_str("succeeded"),
            AbortOutcome::TooLate => f.write_str("too late"),
            AbortOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_progress_states() {
        for state in ["Upgrading", "Updating", "Scaling", "Creating", "Deleting"] {
            let op = OperationState::from_provisioning_state(Some(state), None);
            assert!(op.in_progress, "{} should be in progress", state);
            assert_eq!(op.kind, state);
            assert_eq!(op.raw_status, state);
        }
    }

    #[test]
    fn test_terminal_and_unknown_states() {
        for state in ["Succeeded", "Failed", "Canceled", "Migrating", ""] {
            let op = OperationState::from_provisioning_state(Some(state), None);
            assert!(!op.in_progress, "{} should not be in progress", state);
            assert!(op.kind.is_empty());
        }

        let missing = OperationState::from_provisioning_state(None, None);
        assert!(!missing.in_progress);
        assert_eq!(missing.raw_status, "");
    }

    #[test]
    fn test_snapshot_replaces_duplicate_names() {
        let mut snapshot = HealthSnapshot::new();
        snapshot.record(Measurement::FailedJobs, 1);
        snapshot.record(Measurement::RestartCount, 4);
        snapshot.record(Measurement::FailedJobs, 7);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(Measurement::FailedJobs), Some(7));
        let order: Vec<_> = snapshot.iter().map(|m| m.name).collect();
        assert_eq!(order, vec![Measurement::FailedJobs, Measurement::RestartCount]);
    }

    #[test]
    fn test_absent_measurement_is_not_zero() {
        let snapshot: HealthSnapshot = [(Measurement::FailedJobs, 0)].into_iter().collect();
        assert_eq!(snapshot.get(Measurement::FailedJobs), Some(0));
        assert_eq!(snapshot.get(Measurement::CpuUsagePercent), None);
    }

    #[test]
    fn test_abort_outcome_serialization() {
        let json = serde_json::to_value(AbortOutcome::Failed("boom".into())).unwrap();
        assert_eq!(json["outcome"], "failed");
        assert_eq!(json["reason"], "boom");

        let json = serde_json::to_value(AbortOutcome::TooLate).unwrap();
        assert_eq!(json["outcome"], "tooLate");
    }

    #[test]
    fn test_violation_display() {
        let v = Violation {
            measurement: Measurement::CrashingPodsPercent,
            observed: 12,
            threshold: 10,
        };
        assert_eq!(v.to_string(), "crashingPodsPercent: 12 > 10");
    }
}

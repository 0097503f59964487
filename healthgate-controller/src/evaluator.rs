//! Threshold evaluation

use healthgate_common::{HealthSnapshot, ThresholdPolicy, Violation};
use tracing::warn;

/// Compare every measurement in `snapshot` against `policy`.
///
/// A measurement with no configured threshold is compared against 0, so any
/// positive reading is flagged. Violations are returned in snapshot order.
pub fn evaluate(snapshot: &HealthSnapshot, policy: &ThresholdPolicy) -> Vec<Violation> {
    snapshot
        .iter()
        .filter_map(|m| {
            let threshold = policy.threshold_for(m.name).unwrap_or_else(|| {
                warn!(measurement = %m.name, "No threshold configured, using 0");
                0
            });

            (m.value > threshold).then_some(Violation {
                measurement: m.name,
                observed: m.value,
                threshold,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use healthgate_common::Measurement;

    #[test]
    fn test_crashing_pods_scenario() {
        let snapshot: HealthSnapshot = [
            (Measurement::CrashingPodsPercent, 12),
            (Measurement::PendingPodsPercent, 5),
            (Measurement::NotReadyNodesPercent, 0),
            (Measurement::FailedJobs, 0),
            (Measurement::RestartCount, 0),
        ]
        .into_iter()
        .collect();

        let violations = evaluate(&snapshot, &ThresholdPolicy::default());
        assert_eq!(
            violations,
            vec![Violation {
                measurement: Measurement::CrashingPodsPercent,
                observed: 12,
                threshold: 10,
            }]
        );
    }

    #[test]
    fn test_threshold_boundary() {
        let policy = ThresholdPolicy::empty().with(Measurement::FailedJobs, 3);

        let at: HealthSnapshot = [(Measurement::FailedJobs, 3)].into_iter().collect();
        assert!(evaluate(&at, &policy).is_empty());

        let above: HealthSnapshot = [(Measurement::FailedJobs, 4)].into_iter().collect();
        assert_eq!(evaluate(&above, &policy).len(), 1);
    }

    #[test]
    fn test_unmapped_measurement_uses_zero() {
        let policy = ThresholdPolicy::empty();
        let snapshot: HealthSnapshot = [
            (Measurement::CpuUsagePercent, 0),
            (Measurement::MemoryUsagePercent, 1),
        ]
        .into_iter()
        .collect();

        let violations = evaluate(&snapshot, &policy);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].measurement, Measurement::MemoryUsagePercent);
        assert_eq!(violations[0].threshold, 0);
    }

    #[test]
    fn test_violation_order_follows_snapshot() {
        let policy = ThresholdPolicy::empty();
        let snapshot: HealthSnapshot = [
            (Measurement::RestartCount, 5),
            (Measurement::CrashingPodsPercent, 50),
            (Measurement::FailedJobs, 1),
        ]
        .into_iter()
        .collect();

        let order: Vec<_> = evaluate(&snapshot, &policy)
            .into_iter()
            .map(|v| v.measurement)
            .collect();
        assert_eq!(
            order,
            vec![
                Measurement::RestartCount,
                Measurement::CrashingPodsPercent,
                Measurement::FailedJobs
            ]
        );
    }

    #[test]
    fn test_empty_cluster_has_no_violations() {
        let snapshot: HealthSnapshot = Measurement::ALL.iter().map(|m| (*m, 0)).collect();
        assert!(evaluate(&snapshot, &ThresholdPolicy::default()).is_empty());
    }

    #[test]
    fn test_reading_of_100_percent() {
        let policy = ThresholdPolicy::empty().with(Measurement::NotReadyNodesPercent, 100);
        let snapshot: HealthSnapshot = [(Measurement::NotReadyNodesPercent, 100)]
            .into_iter()
            .collect();
        assert!(evaluate(&snapshot, &policy).is_empty());
    }
}

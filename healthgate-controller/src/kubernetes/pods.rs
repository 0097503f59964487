//! Pod-derived measurements

use healthgate_common::{HealthSnapshot, Measurement};
use k8s_openapi::api::core::v1::Pod;
use kube::api::Api;

use super::client::K8sClient;
use super::error::K8sResult;
use super::percent;

/// Container waiting reasons that count a pod as crashing
const CRASH_WAITING_REASONS: [&str; 4] = [
    "CrashLoopBackOff",
    "ImagePullBackOff",
    "ErrImagePull",
    "CreateContainerError",
];

/// List pods in all namespaces
pub async fn list_pods(client: &K8sClient) -> K8sResult<Vec<Pod>> {
    let pods: Api<Pod> = Api::all(client.inner().clone());
    super::list_all(&pods, "pods").await
}

fn phase(pod: &Pod) -> Option<&str> {
    pod.status.as_ref().and_then(|s| s.phase.as_deref())
}

/// A pod is crashing if it failed, if a container is stuck in a crash/pull
/// backoff, or if a container terminated with a non-zero exit code
pub fn is_pod_crashing(pod: &Pod) -> bool {
    if phase(pod) == Some("Failed") {
        return true;
    }

    let statuses = pod
        .status
        .as_ref()
        .and_then(|s| s.container_statuses.as_deref())
        .unwrap_or_default();

    statuses.iter().any(|cs| {
        let Some(state) = cs.state.as_ref() else {
            return false;
        };

        let crash_waiting = state
            .waiting
            .as_ref()
            .and_then(|w| w.reason.as_deref())
            .is_some_and(|reason| CRASH_WAITING_REASONS.contains(&reason));

        let bad_exit = state
            .terminated
            .as_ref()
            .is_some_and(|t| t.exit_code != 0);

        crash_waiting || bad_exit
    })
}

pub fn is_pod_pending(pod: &Pod) -> bool {
    phase(pod) == Some("Pending")
}

/// Sum of container restart counts
pub fn pod_restart_count(pod: &Pod) -> u64 {
    pod.status
        .as_ref()
        .and_then(|s| s.container_statuses.as_ref())
        .map(|statuses| {
            statuses
                .iter()
                .map(|cs| u64::try_from(cs.restart_count).unwrap_or(0))
                .sum()
        })
        .unwrap_or(0)
}

/// Crashing %, pending % and total restarts, in that order
pub fn pod_measurements(pods: &[Pod]) -> HealthSnapshot {
    let total = pods.len() as u64;
    let crashing = pods.iter().filter(|p| is_pod_crashing(p)).count() as u64;
    let pending = pods.iter().filter(|p| is_pod_pending(p)).count() as u64;
    let restarts: u64 = pods.iter().map(pod_restart_count).sum();

    let mut snapshot = HealthSnapshot::new();
    snapshot.record(Measurement::CrashingPodsPercent, percent(crashing, total));
    snapshot.record(Measurement::PendingPodsPercent, percent(pending, total));
    snapshot.record(Measurement::RestartCount, restarts);
    snapshot
}

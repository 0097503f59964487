//! Job-derived measurements

use healthgate_common::{HealthSnapshot, Measurement};
use k8s_openapi::api::batch::v1::Job;
use kube::api::Api;

use super::client::K8sClient;
use super::error::K8sResult;

/// List Jobs in all namespaces
pub async fn list_jobs(client: &K8sClient) -> K8sResult<Vec<Job>> {
    let jobs: Api<Job> = Api::all(client.inner().clone());
    super::list_all(&jobs, "jobs").await
}

/// A job has failed if any of its pods failed
pub fn is_job_failed(job: &Job) -> bool {
    job.status
        .as_ref()
        .and_then(|s| s.failed)
        .is_some_and(|failed| failed > 0)
}

/// Count of failed jobs
pub fn job_measurements(jobs: &[Job]) -> HealthSnapshot {
    let failed = jobs.iter().filter(|j| is_job_failed(j)).count() as u64;

    let mut snapshot = HealthSnapshot::new();
    snapshot.record(Measurement::FailedJobs, failed);
    snapshot
}

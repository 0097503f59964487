//! Cluster health snapshot collection

use async_trait::async_trait;
use healthgate_common::HealthSnapshot;
use tracing::debug;

use super::{jobs, metrics, nodes, pods, ClusterReader};
use crate::controller::SnapshotSource;
use crate::error::Result;

/// Snapshot source backed by the cluster API.
///
/// Groups are collected in a fixed order (pods, nodes, jobs, then resource
/// usage when enabled). The first group failure aborts collection; no
/// partial snapshot is returned.
pub struct WorkloadSnapshotSource<R> {
    reader: R,
    include_resource_usage: bool,
}

impl<R: ClusterReader> WorkloadSnapshotSource<R> {
    pub fn new(reader: R, include_resource_usage: bool) -> Self {
        Self {
            reader,
            include_resource_usage,
        }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }
}

#[async_trait]
impl<R: ClusterReader> SnapshotSource for WorkloadSnapshotSource<R> {
    async fn collect_snapshot(&self) -> Result<HealthSnapshot> {
        let pod_list = self.reader.list_pods().await?;
        let mut snapshot = pods::pod_measurements(&pod_list);

        let node_list = self.reader.list_nodes().await?;
        snapshot.extend(nodes::node_measurements(&node_list));

        let job_list = self.reader.list_jobs().await?;
        snapshot.extend(jobs::job_measurements(&job_list));

        if self.include_resource_usage {
            let usage = self.reader.node_usage().await?;
            snapshot.extend(metrics::resource_usage_measurements(&node_list, &usage));
        }

        debug!(
            pods = pod_list.len(),
            nodes = node_list.len(),
            jobs = job_list.len(),
            measurements = snapshot.len(),
            "Collected health snapshot"
        );

        Ok(snapshot)
    }
}

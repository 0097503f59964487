//! Kubernetes integration
//!
//! Reads workload and node state cluster-wide and turns it into health
//! measurements:
//! - Pods: crashing %, pending %, total container restarts
//! - Nodes: not-ready %
//! - Jobs: failed job count
//! - metrics-server (optional): cluster CPU / memory usage %

pub mod client;
pub mod error;
pub mod jobs;
pub mod metrics;
pub mod nodes;
pub mod pods;
pub mod snapshot;

use std::fmt::Debug;

use async_trait::async_trait;
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::{Node, Pod};
use kube::api::{Api, ListParams};
use serde::de::DeserializeOwned;

pub use client::K8sClient;
use error::K8sResult;
pub use metrics::NodeUsage;
pub use snapshot::WorkloadSnapshotSource;

/// Page size for cluster-wide list calls
const LIST_PAGE_SIZE: u32 = 500;

/// Read access to the cluster objects the snapshot is derived from
#[async_trait]
pub trait ClusterReader: Send + Sync {
    /// All pods, across namespaces
    async fn list_pods(&self) -> K8sResult<Vec<Pod>>;

    /// All nodes
    async fn list_nodes(&self) -> K8sResult<Vec<Node>>;

    /// All jobs, across namespaces
    async fn list_jobs(&self) -> K8sResult<Vec<Job>>;

    /// Current node resource usage from metrics-server
    async fn node_usage(&self) -> K8sResult<Vec<NodeUsage>>;
}

#[async_trait]
impl ClusterReader for K8sClient {
    async fn list_pods(&self) -> K8sResult<Vec<Pod>> {
        pods::list_pods(self).await
    }

    async fn list_nodes(&self) -> K8sResult<Vec<Node>> {
        nodes::list_nodes(self).await
    }

    async fn list_jobs(&self) -> K8sResult<Vec<Job>> {
        jobs::list_jobs(self).await
    }

    async fn node_usage(&self) -> K8sResult<Vec<NodeUsage>> {
        metrics::get_node_usage(self).await
    }
}

/// List every object of a kind, following continue tokens
pub(crate) async fn list_all<K>(api: &Api<K>, kind: &'static str) -> K8sResult<Vec<K>>
where
    K: Clone + DeserializeOwned + Debug,
{
    let mut items = Vec::new();
    let mut params = ListParams::default().limit(LIST_PAGE_SIZE);

    loop {
        let page = api
            .list(&params)
            .await
            .map_err(error::K8sError::list_failed(kind))?;
        items.extend(page.items);

        match page.metadata.continue_ {
            Some(token) if !token.is_empty() => params = params.continue_token(&token),
            _ => break,
        }
    }

    Ok(items)
}

/// Integer percentage of `count` over `total`; 0 when `total` is 0
pub fn percent(count: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    count.saturating_mul(100) / total
}

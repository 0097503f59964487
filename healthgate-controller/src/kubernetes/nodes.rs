//! Node-derived measurements

use healthgate_common::{HealthSnapshot, Measurement};
use k8s_openapi::api::core::v1::Node;
use kube::api::Api;

use super::client::K8sClient;
use super::error::K8sResult;
use super::percent;

/// List all nodes
pub async fn list_nodes(client: &K8sClient) -> K8sResult<Vec<Node>> {
    let nodes: Api<Node> = Api::all(client.inner().clone());
    super::list_all(&nodes, "nodes").await
}

/// A node is ready only if it reports a `Ready` condition with status `True`
pub fn is_node_ready(node: &Node) -> bool {
    node.status
        .as_ref()
        .and_then(|s| s.conditions.as_ref())
        .and_then(|conditions| conditions.iter().find(|c| c.type_ == "Ready"))
        .is_some_and(|ready| ready.status == "True")
}

/// Not-ready node percentage
pub fn node_measurements(nodes: &[Node]) -> HealthSnapshot {
    let total = nodes.len() as u64;
    let not_ready = nodes.iter().filter(|n| !is_node_ready(n)).count() as u64;

    let mut snapshot = HealthSnapshot::new();
    snapshot.record(Measurement::NotReadyNodesPercent, percent(not_ready, total));
    snapshot
}

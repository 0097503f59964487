//! Resource usage from metrics-server
//!
//! Fetches node usage from `metrics.k8s.io` and compares it with node
//! allocatable capacity to derive cluster-wide CPU and memory usage.

use healthgate_common::{HealthSnapshot, Measurement};
use k8s_openapi::api::core::v1::Node;

use super::client::K8sClient;
use super::error::{K8sError, K8sResult};

/// Current usage of one node
#[derive(Debug, Clone, PartialEq)]
pub struct NodeUsage {
    pub name: String,
    pub cpu_cores: f64,
    pub memory_bytes: f64,
}

/// Get usage for all nodes
pub async fn get_node_usage(client: &K8sClient) -> K8sResult<Vec<NodeUsage>> {
    let request = http::Request::builder()
        .method(http::Method::GET)
        .uri("/apis/metrics.k8s.io/v1beta1/nodes")
        .body(vec![])
        .map_err(|e| K8sError::Internal(e.to_string()))?;

    let response: serde_json::Value = client
        .inner()
        .request(request)
        .await
        .map_err(|e| K8sError::MetricsUnavailable(e.to_string()))?;

    parse_node_metrics(&response)
}

/// Parse a `NodeMetricsList` document
pub fn parse_node_metrics(response: &serde_json::Value) -> K8sResult<Vec<NodeUsage>> {
    let items = response["items"].as_array().ok_or_else(|| {
        K8sError::MetricsUnavailable("response has no items array".to_string())
    })?;

    Ok(items
        .iter()
        .filter_map(|item| {
            let name = item["metadata"]["name"].as_str()?.to_string();
            let usage = &item["usage"];
            let cpu_cores = parse_quantity(usage["cpu"].as_str()?)?;
            let memory_bytes = parse_quantity(usage["memory"].as_str()?)?;

            Some(NodeUsage {
                name,
                cpu_cores,
                memory_bytes,
            })
        })
        .collect())
}

/// Parse a Kubernetes quantity (`250m`, `1500n`, `2`, `1024Ki`, `2Gi`, `1G`)
/// into base units
pub fn parse_quantity(raw: &str) -> Option<f64> {
    const SUFFIXES: [(&str, f64); 15] = [
        ("Ki", 1024.0),
        ("Mi", 1024.0 * 1024.0),
        ("Gi", 1024.0 * 1024.0 * 1024.0),
        ("Ti", 1024.0 * 1024.0 * 1024.0 * 1024.0),
        ("Pi", 1024.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0),
        ("Ei", 1024.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0),
        ("n", 1e-9),
        ("u", 1e-6),
        ("m", 1e-3),
        ("k", 1e3),
        ("M", 1e6),
        ("G", 1e9),
        ("T", 1e12),
        ("P", 1e15),
        ("E", 1e18),
    ];

    let s = raw.trim();
    for (suffix, multiplier) in SUFFIXES {
        if let Some(number) = s.strip_suffix(suffix) {
            return number.parse::<f64>().ok().map(|n| n * multiplier);
        }
    }
    s.parse::<f64>().ok()
}

fn allocatable(node: &Node, resource: &str) -> Option<f64> {
    node.status
        .as_ref()
        .and_then(|s| s.allocatable.as_ref())
        .and_then(|a| a.get(resource))
        .and_then(|q| parse_quantity(&q.0))
}

fn usage_percent(used: f64, total: f64) -> u64 {
    if total <= 0.0 {
        return 0;
    }
    ((used * 100.0) / total).floor() as u64
}

/// CPU and memory usage as a percentage of allocatable capacity, counting
/// only nodes that report usage
pub fn resource_usage_measurements(nodes: &[Node], usage: &[NodeUsage]) -> HealthSnapshot {
    let (mut cpu_used, mut cpu_total) = (0.0, 0.0);
    let (mut mem_used, mut mem_total) = (0.0, 0.0);

    for u in usage {
        let Some(node) = nodes
            .iter()
            .find(|n| n.metadata.name.as_deref() == Some(u.name.as_str()))
        else {
            continue;
        };

        if let Some(cpu) = allocatable(node, "cpu") {
            cpu_used += u.cpu_cores;
            cpu_total += cpu;
        }
        if let Some(memory) = allocatable(node, "memory") {
            mem_used += u.memory_bytes;
            mem_total += memory;
        }
    }

    let mut snapshot = HealthSnapshot::new();
    snapshot.record(Measurement::CpuUsagePercent, usage_percent(cpu_used, cpu_total));
    snapshot.record(Measurement::MemoryUsagePercent, usage_percent(mem_used, mem_total));
    snapshot
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::NodeStatus;
    use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use std::collections::BTreeMap;

    pub(crate) fn node_with_capacity(name: &str, cpu: &str, memory: &str) -> Node {
        let mut allocatable = BTreeMap::new();
        allocatable.insert("cpu".to_string(), Quantity(cpu.to_string()));
        allocatable.insert("memory".to_string(), Quantity(memory.to_string()));

        Node {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            status: Some(NodeStatus {
                allocatable: Some(allocatable),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_cpu_quantities() {
        assert_eq!(parse_quantity("2"), Some(2.0));
        assert_eq!(parse_quantity("250m"), Some(0.25));
        assert_eq!(parse_quantity("0.5"), Some(0.5));
        let nanos = parse_quantity("1500000000n").unwrap();
        assert!((nanos - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_parse_memory_quantities() {
        assert_eq!(parse_quantity("1024Ki"), Some(1024.0 * 1024.0));
        assert_eq!(parse_quantity("2Gi"), Some(2.0 * 1024.0 * 1024.0 * 1024.0));
        assert_eq!(parse_quantity("1G"), Some(1e9));
        assert_eq!(parse_quantity("12345"), Some(12345.0));
    }

    #[test]
    fn test_parse_invalid_quantities() {
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("Mi"), None);
        assert_eq!(parse_quantity("lots"), None);
    }

    #[test]
    fn test_parse_node_metrics() {
        let response = serde_json::json!({
            "kind": "NodeMetricsList",
            "items": [
                {"metadata": {"name": "node-a"}, "usage": {"cpu": "500m", "memory": "1Gi"}},
                {"metadata": {"name": "node-b"}, "usage": {"cpu": "garbage", "memory": "1Gi"}}
            ]
        });

        let usage = parse_node_metrics(&response).unwrap();
        assert_eq!(usage.len(), 1);
        assert_eq!(usage[0].name, "node-a");
        assert_eq!(usage[0].cpu_cores, 0.5);

        assert!(parse_node_metrics(&serde_json::json!({"kind": "Status"})).is_err());
    }

    #[test]
    fn test_resource_usage_measurements() {
        let nodes = vec![
            node_with_capacity("node-a", "2", "4Gi"),
            node_with_capacity("node-b", "2", "4Gi"),
            node_with_capacity("node-c", "4", "8Gi"),
        ];
        let usage = vec![
            NodeUsage {
                name: "node-a".into(),
                cpu_cores: 1.0,
                memory_bytes: 2.0 * 1024.0 * 1024.0 * 1024.0,
            },
            NodeUsage {
                name: "node-b".into(),
                cpu_cores: 2.0,
                memory_bytes: 4.0 * 1024.0 * 1024.0 * 1024.0,
            },
            NodeUsage {
                name: "gone".into(),
                cpu_cores: 100.0,
                memory_bytes: 1.0,
            },
        ];

        let snapshot = resource_usage_measurements(&nodes, &usage);
        assert_eq!(snapshot.get(Measurement::CpuUsagePercent), Some(75));
        assert_eq!(snapshot.get(Measurement::MemoryUsagePercent), Some(75));
    }

    #[test]
    fn test_resource_usage_without_capacity() {
        let snapshot = resource_usage_measurements(&[], &[]);
        assert_eq!(snapshot.get(Measurement::CpuUsagePercent), Some(0));
        assert_eq!(snapshot.get(Measurement::MemoryUsagePercent), Some(0));
    }
}

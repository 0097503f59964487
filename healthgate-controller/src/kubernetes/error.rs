//! Kubernetes error types

use thiserror::Error;

/// Kubernetes-specific errors
#[derive(Debug, Error)]
pub enum K8sError {
    /// Error from kube-rs client
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    /// Invalid kubeconfig
    #[error("Invalid kubeconfig: {0}")]
    InvalidKubeconfig(String),

    /// A list call for one measurement group failed
    #[error("Failed to list {kind}: {source}")]
    ListFailed {
        kind: &'static str,
        #[source]
        source: kube::Error,
    },

    /// metrics.k8s.io is not served or returned garbage
    #[error("Metrics API unavailable: {0}")]
    MetricsUnavailable(String),

    /// Internal system error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl K8sError {
    pub(crate) fn list_failed(kind: &'static str) -> impl FnOnce(kube::Error) -> K8sError {
        move |source| K8sError::ListFailed { kind, source }
    }
}

/// Result type alias for Kubernetes operations
pub type K8sResult<T> = std::result::Result<T, K8sError>;

//! Crate-level error types
//!
//! Each external boundary has its own error enum (`K8sError`, `AzureError`);
//! `MonitorError` unifies them for the collaborator traits the control loop
//! depends on. Configuration errors stop the binary before the loop starts
//! and stay `ConfigError`.

use crate::azure::error::AzureError;
use crate::kubernetes::error::K8sError;
use thiserror::Error;

/// Errors surfaced by the controller's collaborators
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Cluster API failure
    #[error("Kubernetes error: {0}")]
    Kubernetes(#[from] K8sError),

    /// Cloud management API failure
    #[error("Azure error: {0}")]
    Azure(#[from] AzureError),

    /// Logging could not be initialized
    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// Internal system error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failures that skip the remainder of a cycle
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("failed to get cluster operation status: {0}")]
    Status(#[source] MonitorError),

    #[error("failed to collect health snapshot: {0}")]
    Snapshot(#[source] MonitorError),
}

impl CycleError {
    /// Whether the failure happened while querying the operation status
    pub fn is_status_failure(&self) -> bool {
        matches!(self, CycleError::Status(_))
    }
}

/// Result type alias for controller operations
pub type Result<T> = std::result::Result<T, MonitorError>;

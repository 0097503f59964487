//! Healthgate controller
//!
//! Watches the health of a managed Kubernetes cluster while an
//! infrastructure operation (upgrade, update, scale) is running, and cancels
//! the operation when health measurements exceed their thresholds.

pub mod azure;
pub mod config;
pub mod controller;
pub mod error;
pub mod evaluator;
pub mod health;
pub mod kubernetes;
pub mod logging;
pub mod server;
pub mod shutdown;

pub use config::MonitorConfig;
pub use controller::{
    AbortActuator, Controller, CycleOutcome, OperationStatusSource, SnapshotSource, StatusHandle,
};
pub use error::{CycleError, MonitorError, Result};
pub use shutdown::{ShutdownCoordinator, ShutdownSignal, TaskShutdown};

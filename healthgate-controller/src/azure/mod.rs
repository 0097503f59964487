//! Azure Kubernetes Service management
//!
//! Reads the managed cluster's provisioning state and cancels its latest
//! operation through the resource manager REST API.

pub mod auth;
pub mod client;
pub mod error;
pub mod poller;

pub use client::{AksClient, ManagedClusterStatus};
pub use error::{AzureError, AzureResult};

//! Kubernetes client wrapper
//!
//! Wraps the kube-rs Client with connection details and a bounded read
//! timeout so that list calls cannot block a cycle indefinitely.

use std::path::Path;
use std::time::Duration;

use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};

use super::error::{K8sError, K8sResult};
use crate::config::KubernetesConfig;

/// Wrapper around kube-rs Client
#[derive(Clone)]
pub struct K8sClient {
    inner: Client,
    api_server: String,
}

impl K8sClient {
    /// Create a client from the configured kubeconfig, or by inference
    /// (KUBECONFIG, ~/.kube/config, then in-cluster service account)
    pub async fn from_settings(settings: &KubernetesConfig) -> K8sResult<Self> {
        match &settings.kubeconfig {
            Some(path) => {
                Self::from_kubeconfig(path, settings.context.as_deref(), settings.request_timeout)
                    .await
            }
            None => match settings.context.as_deref() {
                Some(context) => Self::from_default_kubeconfig(context, settings.request_timeout).await,
                None => Self::infer(settings.request_timeout).await,
            },
        }
    }

    /// Create client from the default kubeconfig location with a named context
    pub async fn from_default_kubeconfig(context: &str, read_timeout: Duration) -> K8sResult<Self> {
        let config = Config::from_kubeconfig(&KubeConfigOptions {
            context: Some(context.to_string()),
            ..Default::default()
        })
        .await
        .map_err(|e| K8sError::InvalidKubeconfig(format!("Failed to load context {}: {}", context, e)))?;

        Self::from_config(config, read_timeout)
    }

    /// Create client from a kubeconfig file with optional context
    pub async fn from_kubeconfig(
        path: &Path,
        context: Option<&str>,
        read_timeout: Duration,
    ) -> K8sResult<Self> {
        let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
            K8sError::InvalidKubeconfig(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config = Config::from_custom_kubeconfig(
            kubeconfig,
            &KubeConfigOptions {
                context: context.map(String::from),
                ..Default::default()
            },
        )
        .await
        .map_err(|e| K8sError::InvalidKubeconfig(format!("Failed to create config: {}", e)))?;

        Self::from_config(config, read_timeout)
    }

    /// Create client by inferring the environment
    pub async fn infer(read_timeout: Duration) -> K8sResult<Self> {
        let config = Config::infer().await.map_err(|e| {
            K8sError::InvalidKubeconfig(format!("Failed to infer cluster config: {}", e))
        })?;

        Self::from_config(config, read_timeout)
    }

    fn from_config(mut config: Config, read_timeout: Duration) -> K8sResult<Self> {
        config.read_timeout = Some(read_timeout);
        let api_server = config.cluster_url.to_string();

        let client = Client::try_from(config)
            .map_err(|e| K8sError::InvalidKubeconfig(format!("Failed to create client: {}", e)))?;

        Ok(Self {
            inner: client,
            api_server,
        })
    }

    /// Get the inner kube-rs Client
    pub fn inner(&self) -> &Client {
        &self.inner
    }

    /// Get API server URL
    pub fn api_server(&self) -> &str {
        &self.api_server
    }

    /// Get the API server's git version
    pub async fn get_version(&self) -> K8sResult<String> {
        let version = self.inner.apiserver_version().await?;
        Ok(version.git_version)
    }
}

impl std::fmt::Debug for K8sClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("K8sClient")
            .field("api_server", &self.api_server)
            .finish()
    }
}

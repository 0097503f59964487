//! Managed cluster client for the Azure resource manager REST API

use async_trait::async_trait;
use healthgate_common::{AbortOutcome, OperationState};
use reqwest::header::{ETAG, IF_MATCH};
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::auth::ClientSecretCredential;
use super::error::{AzureError, AzureResult};
use super::poller::AbortPoller;
use crate::config::{AbortConfig, AzureConfig};
use crate::controller::{AbortActuator, OperationStatusSource};
use crate::error::Result;

/// Fields read from a managed cluster resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagedClusterStatus {
    pub provisioning_state: Option<String>,
    pub etag: Option<String>,
}

/// Client for one managed cluster
pub struct AksClient {
    http: reqwest::Client,
    credential: Arc<ClientSecretCredential>,
    cluster_url: String,
    api_version: String,
    abort_timeout: Duration,
    abort_poll_interval: Duration,
    conditional_abort: bool,
}

impl AksClient {
    pub fn new(azure: &AzureConfig, abort: &AbortConfig) -> AzureResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(azure.request_timeout)
            .user_agent(concat!("healthgate-controller/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            credential: Arc::new(ClientSecretCredential::new(http.clone(), azure)),
            http,
            cluster_url: format!(
                "{}{}",
                azure.management_endpoint.trim_end_matches('/'),
                azure.cluster_resource_id()
            ),
            api_version: azure.api_version.clone(),
            abort_timeout: abort.timeout,
            abort_poll_interval: abort.poll_interval,
            conditional_abort: abort.conditional,
        })
    }

    /// Read the cluster's provisioning state and eTag
    pub async fn get_managed_cluster(&self) -> AzureResult<ManagedClusterStatus> {
        let token = self.credential.token().await?;
        let response = self
            .http
            .get(&self.cluster_url)
            .query(&[("api-version", self.api_version.as_str())])
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AzureError::from_response(response).await);
        }

        let header_etag = response
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AzureError::InvalidResponse(format!("managed cluster: {}", e)))?;

        let body_etag = body["eTag"]
            .as_str()
            .or_else(|| body["etag"].as_str())
            .map(str::to_string);

        Ok(ManagedClusterStatus {
            provisioning_state: body["properties"]["provisioningState"]
                .as_str()
                .map(str::to_string),
            etag: body_etag.or(header_etag),
        })
    }

    /// Request cancellation of the cluster's latest operation.
    ///
    /// Returns `None` when the service completed the request synchronously,
    /// otherwise a poller for the cancellation.
    pub async fn begin_abort_latest_operation(
        &self,
        if_match: Option<&str>,
    ) -> AzureResult<Option<AbortPoller>> {
        let token = self.credential.token().await?;
        let mut request = self
            .http
            .post(format!("{}/abort", self.cluster_url))
            .query(&[("api-version", self.api_version.as_str())])
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_LENGTH, 0);
        if let Some(etag) = if_match {
            request = request.header(IF_MATCH, etag);
        }

        let response = request.send().await?;
        match response.status() {
            StatusCode::NO_CONTENT | StatusCode::OK => Ok(None),
            StatusCode::ACCEPTED => AbortPoller::from_accepted(
                self.http.clone(),
                Arc::clone(&self.credential),
                response.headers(),
            )
            .map(Some),
            _ => Err(AzureError::from_response(response).await),
        }
    }
}

#[async_trait]
impl OperationStatusSource for AksClient {
    async fn operation_status(&self) -> Result<OperationState> {
        let cluster = self.get_managed_cluster().await?;
        Ok(OperationState::from_provisioning_state(
            cluster.provisioning_state.as_deref(),
            cluster.etag,
        ))
    }
}

#[async_trait]
impl AbortActuator for AksClient {
    async fn abort(&self, operation: &OperationState) -> AbortOutcome {
        let if_match = if self.conditional_abort {
            if operation.etag.is_none() {
                warn!(
                    operation = %operation.kind,
                    "No eTag captured with the operation status, sending unconditional abort"
                );
            }
            operation.etag.as_deref()
        } else {
            None
        };

        let poller = match self.begin_abort_latest_operation(if_match).await {
            Ok(Some(poller)) => poller,
            Ok(None) => return AbortOutcome::Succeeded,
            Err(e) if e.is_too_late() => {
                info!(operation = %operation.kind, error = %e, "Abort rejected, operation already finished");
                return AbortOutcome::TooLate;
            }
            Err(e) => return AbortOutcome::Failed(format!("failed to initiate abort: {}", e)),
        };

        debug!(target = ?poller.target(), "Waiting for abort to complete");

        match poller
            .poll_until_done(self.abort_timeout, self.abort_poll_interval)
            .await
        {
            Ok(()) => AbortOutcome::Succeeded,
            Err(e) => AbortOutcome::Failed(format!("abort did not complete: {}", e)),
        }
    }
}

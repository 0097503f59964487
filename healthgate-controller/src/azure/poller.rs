//! Long-running operation polling
//!
//! A `202 Accepted` from the management API points at either an
//! `Azure-AsyncOperation` status document or a `Location` URL. The poller
//! follows whichever was given until the operation reaches a terminal state.

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::auth::ClientSecretCredential;
use super::error::{AzureError, AzureResult};

pub const ASYNC_OPERATION_HEADER: &str = "azure-asyncoperation";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollTarget {
    /// Status document with a `status` field
    AsyncOperation(String),
    /// Polled until it stops answering 202
    Location(String),
}

#[derive(Debug, Deserialize)]
struct AsyncOperationStatus {
    status: String,
    #[serde(default)]
    error: Option<OperationErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
struct OperationErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Server-requested delay before the next poll, in whole seconds
pub fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

pub struct AbortPoller {
    http: reqwest::Client,
    credential: Arc<ClientSecretCredential>,
    target: PollTarget,
    first_delay: Option<Duration>,
}

impl AbortPoller {
    /// Build a poller from the headers of a `202 Accepted` response
    pub(crate) fn from_accepted(
        http: reqwest::Client,
        credential: Arc<ClientSecretCredential>,
        headers: &HeaderMap,
    ) -> AzureResult<Self> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        let target = match (header(ASYNC_OPERATION_HEADER), header("location")) {
            (Some(url), _) => PollTarget::AsyncOperation(url),
            (None, Some(url)) => PollTarget::Location(url),
            (None, None) => {
                return Err(AzureError::InvalidResponse(
                    "202 Accepted without Azure-AsyncOperation or Location header".to_string(),
                ))
            }
        };

        Ok(Self {
            http,
            credential,
            target,
            first_delay: retry_after(headers),
        })
    }

    pub fn target(&self) -> &PollTarget {
        &self.target
    }

    /// Poll until the operation completes.
    ///
    /// Waits `Retry-After` between polls when the service sends one, else
    /// `interval`. Gives up with `Timeout` once `timeout` has elapsed.
    pub async fn poll_until_done(self, timeout: Duration, interval: Duration) -> AzureResult<()> {
        tokio::time::timeout(timeout, self.poll_loop(interval))
            .await
            .map_err(|_| AzureError::Timeout(timeout))?
    }

    async fn poll_loop(&self, interval: Duration) -> AzureResult<()> {
        let mut delay = self.first_delay.unwrap_or(interval);

        loop {
            tokio::time::sleep(delay).await;

            let url = match &self.target {
                PollTarget::AsyncOperation(url) | PollTarget::Location(url) => url,
            };
            let token = self.credential.token().await?;
            let response = self.http.get(url).bearer_auth(token).send().await?;
            let next_delay = retry_after(response.headers()).unwrap_or(interval);

            let done = match self.target {
                PollTarget::AsyncOperation(_) => Self::check_async_operation(response).await?,
                PollTarget::Location(_) => Self::check_location(response).await?,
            };
            if done {
                return Ok(());
            }

            debug!(target_url = %url, next_poll = ?next_delay, "Abort still in progress");
            delay = next_delay;
        }
    }

    async fn check_async_operation(response: reqwest::Response) -> AzureResult<bool> {
        if !response.status().is_success() {
            return Err(AzureError::from_response(response).await);
        }

        let body: AsyncOperationStatus = response
            .json()
            .await
            .map_err(|e| AzureError::InvalidResponse(format!("operation status: {}", e)))?;

        if body.status.eq_ignore_ascii_case("Succeeded") {
            Ok(true)
        } else if body.status.eq_ignore_ascii_case("Failed")
            || body.status.eq_ignore_ascii_case("Canceled")
        {
            let error = body.error.unwrap_or_default();
            Err(AzureError::OperationFailed {
                status: body.status,
                code: error.code,
                message: error.message,
            })
        } else {
            Ok(false)
        }
    }

    async fn check_location(response: reqwest::Response) -> AzureResult<bool> {
        match response.status() {
            StatusCode::ACCEPTED => Ok(false),
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(true),
            _ => Err(AzureError::from_response(response).await),
        }
    }
}

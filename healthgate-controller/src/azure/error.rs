use std::time::Duration;
use thiserror::Error;

/// Errors from the token endpoint and the resource manager API
#[derive(Debug, Error)]
pub enum AzureError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the management API
    #[error("Management API returned {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// A long-running operation reached a terminal non-success state
    #[error("Operation ended as {status} ({code}): {message}")]
    OperationFailed {
        status: String,
        code: String,
        message: String,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

impl AzureError {
    /// Whether the request was rejected because the operation it targeted
    /// already finished or is no longer current.
    ///
    /// 409 or any `*Conflict*` error code means the operation completed
    /// before the cancellation landed; 412 means the If-Match eTag no longer
    /// matches the cluster.
    pub fn is_too_late(&self) -> bool {
        match self {
            AzureError::Api { status, code, .. } => {
                matches!(status, 409 | 412) || code.contains("Conflict")
            }
            _ => false,
        }
    }

    /// Build an `Api` error from a non-success response, reading the ARM
    /// error envelope `{"error": {"code": ..., "message": ...}}` when present
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        let (code, message) = match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(json) => (
                json["error"]["code"].as_str().unwrap_or_default().to_string(),
                json["error"]["message"]
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or(body),
            ),
            Err(_) => (String::new(), body),
        };

        AzureError::Api {
            status,
            code,
            message,
        }
    }
}

pub type AzureResult<T> = std::result::Result<T, AzureError>;

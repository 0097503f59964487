//! OAuth2 client-credentials flow against the Microsoft identity platform

use serde::Deserialize;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use super::error::{AzureError, AzureResult};
use crate::config::AzureConfig;

/// Tokens are refreshed this long before they expire
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    /// Seconds; some endpoints send it as a string
    #[serde(default)]
    expires_in: Option<serde_json::Value>,
}

struct CachedToken {
    token: String,
    refresh_at: Instant,
}

/// Service principal credential with an in-memory token cache
pub struct ClientSecretCredential {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    scope: String,
    cache: Mutex<Option<CachedToken>>,
}

impl ClientSecretCredential {
    pub fn new(http: reqwest::Client, config: &AzureConfig) -> Self {
        Self {
            http,
            token_url: format!(
                "{}/{}/oauth2/v2.0/token",
                config.authority_host.trim_end_matches('/'),
                config.tenant_id
            ),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            scope: format!("{}/.default", config.management_endpoint.trim_end_matches('/')),
            cache: Mutex::new(None),
        }
    }

    /// Get a bearer token, requesting a new one when the cached token is
    /// missing or close to expiry
    pub async fn token(&self) -> AzureResult<String> {
        let mut cache = self.cache.lock().await;

        if let Some(cached) = cache.as_ref() {
            if Instant::now() < cached.refresh_at {
                return Ok(cached.token.clone());
            }
        }

        let fresh = self.request_token().await?;
        let token = fresh.token.clone();
        *cache = Some(fresh);
        Ok(token)
    }

    async fn request_token(&self) -> AzureResult<CachedToken> {
        debug!(url = %self.token_url, "Requesting management API token");

        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("scope", self.scope.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|json| json["error_description"].as_str().map(str::to_string))
                .unwrap_or(body);
            return Err(AzureError::Auth(format!("token endpoint returned {}: {}", status, detail)));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AzureError::Auth(format!("failed to parse token response: {}", e)))?;

        let lifetime = match body.expires_in {
            Some(serde_json::Value::Number(n)) => n.as_u64(),
            Some(serde_json::Value::String(s)) => s.parse().ok(),
            _ => None,
        }
        .map(Duration::from_secs)
        .unwrap_or(Duration::ZERO);

        let now = Instant::now();
        Ok(CachedToken {
            token: body.access_token,
            refresh_at: now
                .checked_add(lifetime.saturating_sub(EXPIRY_MARGIN))
                .unwrap_or(now),
        })
    }
}

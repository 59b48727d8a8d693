//! HTTP identity provider
//!
//! Resolves a bearer token with `GET {base_url}/user`, sending the caller's
//! token as `Authorization` and the project key as `apikey`.

use super::IdentityProvider;
use crate::config::schema::IdentityConfig;
use crate::domain::ids::TenantId;
use crate::domain::{FerryError, Identity, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// [`IdentityProvider`] backed by an HTTP auth service
pub struct HttpIdentityProvider {
    client: Client,
    user_url: String,
    api_key: Option<String>,
}

impl HttpIdentityProvider {
    /// Create a provider from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &IdentityConfig) -> Result<Self> {
        let mut builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(10)));

        if !config.tls_verify {
            tracing::warn!("TLS certificate verification disabled for identity provider");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|e| {
            FerryError::Configuration(format!("Failed to build identity HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            user_url: format!("{}/user", config.base_url.trim_end_matches('/')),
            api_key: config
                .api_key
                .as_ref()
                .map(|k| k.expose_secret().as_str().to_string()),
        })
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn resolve(&self, credential: &str) -> Result<Identity> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(FerryError::Unauthorized("empty credential".to_string()));
        }

        let mut request = self.client.get(&self.user_url).bearer_auth(credential);
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FerryError::Identity(format!("Identity request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FerryError::Unauthorized(format!(
                "credential rejected with status {status}"
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FerryError::Identity(format!(
                "Identity provider returned {status}: {body}"
            )));
        }

        let user: UserResponse = response
            .json()
            .await
            .map_err(|e| FerryError::Identity(format!("Invalid identity response: {e}")))?;

        let tenant_id = TenantId::new(user.id)
            .map_err(|e| FerryError::Identity(format!("Invalid tenant id: {e}")))?;

        tracing::debug!(tenant_id = %tenant_id, "Credential resolved");
        Ok(Identity {
            tenant_id,
            email: user.email,
        })
    }
}

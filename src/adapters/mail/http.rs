//! HTTP mail transport
//!
//! Posts messages as JSON to `{base_url}/emails` with a bearer API key.

use super::{MailTransport, OutboundMessage};
use crate::config::schema::NotifierConfig;
use crate::domain::{FerryError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use std::time::Duration;

/// [`MailTransport`] backed by an HTTP mail API
pub struct HttpMailTransport {
    client: Client,
    emails_url: String,
    api_key: Option<String>,
}

impl HttpMailTransport {
    /// Create a transport from configuration
    ///
    /// A missing API key is allowed here; callers check [`is_configured`]
    /// before doing any work.
    ///
    /// [`is_configured`]: MailTransport::is_configured
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &NotifierConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                FerryError::Configuration(format!("Failed to build mail HTTP client: {e}"))
            })?;

        let api_key = config
            .api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str().trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(Self {
            client,
            emails_url: format!("{}/emails", config.base_url.trim_end_matches('/')),
            api_key,
        })
    }
}

#[async_trait]
impl MailTransport for HttpMailTransport {
    async fn deliver(&self, message: &OutboundMessage) -> Result<()> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            FerryError::Configuration("notifier.api_key is not set".to_string())
        })?;

        let response = self
            .client
            .post(&self.emails_url)
            .bearer_auth(api_key)
            .json(message)
            .send()
            .await
            .map_err(|e| FerryError::Delivery(format!("Mail request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FerryError::Delivery(format!(
                "Mail provider returned {status}: {body}"
            )));
        }

        tracing::debug!(
            recipients = message.to.len(),
            attachments = message.attachments.len(),
            "Message accepted by mail provider"
        );
        Ok(())
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

//! Outbound mail
//!
//! The notifier hands a fully built [`OutboundMessage`] to a [`MailTransport`].
//! Attachment content is already base64 encoded at this point.

pub mod http;

use crate::domain::Result;
use async_trait::async_trait;
use serde::Serialize;

pub use http::HttpMailTransport;

/// One encoded attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailAttachment {
    /// File name shown to the recipient
    pub filename: String,

    /// Base64 (standard alphabet) file content
    pub content: String,
}

/// A message ready for the mail provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    /// Sender, e.g. `Backups <backups@example.com>`
    pub from: String,

    /// Recipients
    pub to: Vec<String>,

    /// Subject line
    pub subject: String,

    /// Plain-text body
    pub text: String,

    /// Attachments
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<MailAttachment>,
}

/// Sends messages with attachments
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver one message
    ///
    /// # Errors
    ///
    /// Returns [`FerryError::Delivery`] on network failure or provider rejection.
    ///
    /// [`FerryError::Delivery`]: crate::domain::FerryError::Delivery
    async fn deliver(&self, message: &OutboundMessage) -> Result<()>;

    /// Whether the transport has the credentials it needs
    fn is_configured(&self) -> bool;
}

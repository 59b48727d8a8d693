//! Notifier
//!
//! Formats the export message for one tenant and hands it to the mail
//! transport with base64 encoded attachments.

use crate::adapters::mail::{MailAttachment, MailTransport, OutboundMessage};
use crate::config::schema::NotifierConfig;
use crate::domain::{ExportAttachment, FerryError, Result};
use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use std::sync::Arc;

/// Builds and dispatches export messages
#[derive(Clone)]
pub struct Notifier {
    transport: Arc<dyn MailTransport>,
    from_address: String,
    subject: String,
    dry_run: bool,
}

impl Notifier {
    /// Create a notifier
    pub fn new(
        transport: Arc<dyn MailTransport>,
        from_address: impl Into<String>,
        subject: impl Into<String>,
        dry_run: bool,
    ) -> Self {
        Self {
            transport,
            from_address: from_address.into(),
            subject: subject.into(),
            dry_run,
        }
    }

    /// Create a notifier from configuration
    pub fn from_config(
        config: &NotifierConfig,
        transport: Arc<dyn MailTransport>,
        dry_run: bool,
    ) -> Self {
        Self::new(transport, &config.from_address, &config.subject, dry_run)
    }

    /// Whether the underlying transport has its credentials
    pub fn is_ready(&self) -> bool {
        self.transport.is_configured()
    }

    /// Whether messages are only logged
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Send one tenant's export
    ///
    /// # Arguments
    ///
    /// * `recipient` - Destination address
    /// * `summary_text` - Per-table row counts, one line per table
    /// * `table_error_text` - Failed tables, shown in a warning section
    /// * `attachments` - CSV files
    ///
    /// # Errors
    ///
    /// Returns [`FerryError::MissingRecipient`] for a blank address (no
    /// delivery is attempted) and the transport's error otherwise.
    pub async fn send(
        &self,
        recipient: &str,
        summary_text: &str,
        table_error_text: Option<&str>,
        attachments: &[ExportAttachment],
    ) -> Result<()> {
        let recipient = recipient.trim();
        if recipient.is_empty() {
            return Err(FerryError::MissingRecipient(
                "recipient address is empty".to_string(),
            ));
        }

        let message = self.build_message(recipient, summary_text, table_error_text, attachments);

        if self.dry_run {
            tracing::info!(
                to = %recipient,
                attachments = message.attachments.len(),
                body_len = message.text.len(),
                "DRY RUN: Would send export message"
            );
            tracing::debug!(body = %message.text, "DRY RUN message body");
            return Ok(());
        }

        self.transport.deliver(&message).await
    }

    /// Build the outbound message without sending it
    pub fn build_message(
        &self,
        recipient: &str,
        summary_text: &str,
        table_error_text: Option<&str>,
        attachments: &[ExportAttachment],
    ) -> OutboundMessage {
        OutboundMessage {
            from: self.from_address.clone(),
            to: vec![recipient.to_string()],
            subject: self.subject.clone(),
            text: compose_body(summary_text, table_error_text),
            attachments: attachments.iter().map(encode_attachment).collect(),
        }
    }
}

fn encode_attachment(attachment: &ExportAttachment) -> MailAttachment {
    MailAttachment {
        filename: attachment.file_name.clone(),
        content: general_purpose::STANDARD.encode(&attachment.content),
    }
}

fn compose_body(summary_text: &str, table_error_text: Option<&str>) -> String {
    let mut body = String::from("Hello,\n\n");
    body.push_str(&format!(
        "Here is your data export from {}.\n\n",
        Utc::now().format("%Y-%m-%d")
    ));

    if summary_text.trim().is_empty() {
        body.push_str("No tables contained data.\n");
    } else {
        body.push_str("Exported tables:\n");
        body.push_str(summary_text.trim_end());
        body.push('\n');
    }

    if let Some(errors) = table_error_text.filter(|t| !t.trim().is_empty()) {
        body.push_str("\nWARNING: some tables could not be exported:\n");
        body.push_str(errors.trim_end());
        body.push('\n');
    }

    body.push_str("\nEach exported table is attached as a CSV file.\n");
    body
}

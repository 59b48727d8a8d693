//! Export results and reports
//!
//! This module defines the values produced by a tenant export job and the
//! aggregated report of a sweep.

use super::errors::TableError;
use super::ids::TenantId;
use serde::Serialize;

/// A single row pulled from the backing store
///
/// Column order is the order the store returned the columns in.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A serialized table ready to be attached to a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportAttachment {
    /// File name, `<table>.csv`
    pub file_name: String,

    /// UTF-8 CSV content
    pub content: Vec<u8>,
}

impl ExportAttachment {
    /// Creates the attachment for a table
    pub fn for_table(table_name: &str, content: Vec<u8>) -> Self {
        Self {
            file_name: format!("{table_name}.csv"),
            content,
        }
    }
}

/// Outcome of one tenant export job
#[derive(Debug, Clone)]
pub struct TenantExportResult {
    /// Tenant that was exported
    pub tenant_id: TenantId,

    /// Address the bundle was (or would have been) sent to
    pub recipient_address: String,

    /// One attachment per table that yielded rows
    pub attachments: Vec<ExportAttachment>,

    /// Row counts per exported table, in manifest order
    pub row_counts: Vec<(String, usize)>,

    /// Tables that failed to export
    pub table_errors: Vec<TableError>,

    /// Whether the bundle was delivered (or there was nothing to send)
    pub delivered: bool,

    /// Delivery failure, if any
    pub delivery_error: Option<String>,
}

impl TenantExportResult {
    /// Creates an empty result for a tenant
    pub fn new(tenant_id: TenantId, recipient_address: impl Into<String>) -> Self {
        Self {
            tenant_id,
            recipient_address: recipient_address.into(),
            attachments: Vec::new(),
            row_counts: Vec::new(),
            table_errors: Vec::new(),
            delivered: false,
            delivery_error: None,
        }
    }

    /// Records a table that produced rows
    pub fn add_table(&mut self, table_name: &str, row_count: usize, attachment: ExportAttachment) {
        self.row_counts.push((table_name.to_string(), row_count));
        self.attachments.push(attachment);
    }

    /// Records a failed table
    pub fn add_table_error(&mut self, error: TableError) {
        self.table_errors.push(error);
    }

    /// True when no table produced rows and none failed
    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty() && self.table_errors.is_empty()
    }

    /// Names of the tables that were exported
    pub fn tables_exported(&self) -> Vec<String> {
        self.row_counts.iter().map(|(t, _)| t.clone()).collect()
    }

    /// Total rows across all exported tables
    pub fn total_rows(&self) -> usize {
        self.row_counts.iter().map(|(_, n)| n).sum()
    }

    /// Log the result
    pub fn log_summary(&self) {
        tracing::info!(
            tenant_id = %self.tenant_id,
            tables = self.row_counts.len(),
            total_rows = self.total_rows(),
            table_errors = self.table_errors.len(),
            delivered = self.delivered,
            "Tenant export finished"
        );

        for error in &self.table_errors {
            tracing::warn!(
                tenant_id = %self.tenant_id,
                table = %error.table_name,
                message = %error.message,
                "Table export error"
            );
        }
    }
}

/// One tenant's line in a sweep report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepEntry {
    /// Recipient address of the tenant
    pub email: String,

    /// Whether the tenant's export was delivered
    pub success: bool,

    /// Failure description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SweepEntry {
    /// A successful entry
    pub fn succeeded(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            success: true,
            error: None,
        }
    }

    /// A failed entry
    pub fn failed(email: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Aggregated outcome of a sweep over every tenant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Per-tenant entries in processing order
    pub results: Vec<SweepEntry>,
}

impl SweepReport {
    /// Creates an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a tenant outcome
    pub fn push(&mut self, entry: SweepEntry) {
        self.results.push(entry);
    }

    /// Number of tenants processed
    pub fn processed(&self) -> usize {
        self.results.len()
    }

    /// Number of tenants whose export succeeded
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|e| e.success).count()
    }

    /// Number of tenants whose export failed
    pub fn failed(&self) -> usize {
        self.processed() - self.succeeded()
    }

    /// Log the report
    pub fn log_summary(&self) {
        tracing::info!(
            processed = self.processed(),
            succeeded = self.succeeded(),
            failed = self.failed(),
            "Sweep completed"
        );

        for entry in self.results.iter().filter(|e| !e.success) {
            tracing::warn!(
                email = %entry.email,
                error = entry.error.as_deref().unwrap_or("unknown"),
                "Tenant export failed"
            );
        }
    }
}

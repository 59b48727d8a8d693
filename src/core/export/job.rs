//! Tenant export job
//!
//! Runs the table exporter over a tenant's manifest, collects attachments,
//! row counts and table errors, and hands the bundle to the notifier.

use crate::adapters::database::TenantStore;
use crate::core::export::csv::serialize_csv;
use crate::core::export::table::export_table;
use crate::core::manifest::resolve_manifest;
use crate::core::notify::Notifier;
use crate::domain::ids::TenantId;
use crate::domain::{ExportAttachment, TableError, TenantExportResult, TenantType};
use crate::{log_table_exported, log_tenant_export_start};
use std::sync::Arc;
use std::time::Instant;

/// Exports one tenant's tables and delivers them
#[derive(Clone)]
pub struct TenantExportJob {
    store: Arc<dyn TenantStore>,
    notifier: Notifier,
}

impl TenantExportJob {
    /// Create a job runner
    pub fn new(store: Arc<dyn TenantStore>, notifier: Notifier) -> Self {
        Self { store, notifier }
    }

    /// Run the export for one tenant
    ///
    /// Tables are processed sequentially in manifest order. A failing table is
    /// recorded and the next one is attempted. When nothing was exported and
    /// nothing failed, no message is sent and the result counts as delivered.
    pub async fn run_export(
        &self,
        tenant_id: &TenantId,
        recipient_address: &str,
        tenant_type: TenantType,
    ) -> TenantExportResult {
        let start = Instant::now();
        let manifest = resolve_manifest(tenant_type);
        log_tenant_export_start!(tenant_id, tenant_type, manifest.len());

        let mut result = TenantExportResult::new(tenant_id.clone(), recipient_address);

        for entry in &manifest.entries {
            let rows = match export_table(self.store.as_ref(), tenant_id, entry).await {
                Ok(rows) => rows,
                Err(error) => {
                    tracing::warn!(
                        tenant_id = %tenant_id,
                        table = %error.table_name,
                        error = %error.message,
                        "Table export failed"
                    );
                    result.add_table_error(error);
                    continue;
                }
            };

            if rows.is_empty() {
                continue;
            }

            match serialize_csv(&rows) {
                Ok(content) => {
                    log_table_exported!(entry.table_name, rows.len());
                    result.add_table(
                        entry.table_name,
                        rows.len(),
                        ExportAttachment::for_table(entry.table_name, content),
                    );
                }
                Err(e) => {
                    result.add_table_error(TableError::new(entry.table_name, e.to_string()));
                }
            }
        }

        if result.is_empty() {
            tracing::info!(tenant_id = %tenant_id, "No data to export; nothing sent");
            result.delivered = true;
            return result;
        }

        let summary = format_summary(&result.row_counts);
        let errors = format_table_errors(&result.table_errors);

        match self
            .notifier
            .send(
                recipient_address,
                &summary,
                errors.as_deref(),
                &result.attachments,
            )
            .await
        {
            Ok(()) => result.delivered = true,
            Err(e) => {
                tracing::error!(tenant_id = %tenant_id, error = %e, "Delivery failed");
                result.delivery_error = Some(e.to_string());
            }
        }

        tracing::debug!(
            tenant_id = %tenant_id,
            duration_ms = start.elapsed().as_millis() as u64,
            "Tenant export job finished"
        );
        result.log_summary();
        result
    }
}

/// One line per exported table: `- <table>: <n> row(s)`
pub fn format_summary(row_counts: &[(String, usize)]) -> String {
    row_counts
        .iter()
        .map(|(table, count)| {
            let noun = if *count == 1 { "row" } else { "rows" };
            format!("- {table}: {count} {noun}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per failed table, or `None` when nothing failed
pub fn format_table_errors(errors: &[TableError]) -> Option<String> {
    if errors.is_empty() {
        return None;
    }
    Some(
        errors
            .iter()
            .map(|e| format!("- {}: {}", e.table_name, e.message))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_summary() {
        let counts = vec![("invoices".to_string(), 3), ("settings".to_string(), 1)];
        assert_eq!(
            format_summary(&counts),
            "- invoices: 3 rows\n- settings: 1 row"
        );
    }

    #[test]
    fn test_format_table_errors() {
        assert_eq!(format_table_errors(&[]), None);
        let errors = vec![TableError::new("payments", "permission denied")];
        assert_eq!(
            format_table_errors(&errors).as_deref(),
            Some("- payments: permission denied")
        );
    }
}

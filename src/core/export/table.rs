//! Table exporter
//!
//! Fetches the rows of one manifest entry that belong to one tenant. Every
//! failure is turned into a [`TableError`] so sibling tables are unaffected.

use crate::adapters::database::TenantStore;
use crate::core::manifest::{Ownership, TableManifestEntry, PARENT_KEY_COLUMN, PARENT_OWNER_COLUMN};
use crate::domain::ids::TenantId;
use crate::domain::{Record, TableError};

/// Fetch the tenant's rows for one manifest entry
///
/// For a derived entry the parent keys are fetched first; when there are
/// none the child table is not queried at all.
///
/// # Errors
///
/// Returns a [`TableError`] carrying the entry's table name on any store failure.
pub async fn export_table(
    store: &dyn TenantStore,
    tenant_id: &TenantId,
    entry: &TableManifestEntry,
) -> Result<Vec<Record>, TableError> {
    let table = entry.table_name;
    let to_table_error = |e: crate::domain::FerryError| TableError::new(table, e.to_string());

    match entry.ownership {
        Ownership::DirectOwner { owner_column } => store
            .fetch_owned_rows(table, owner_column, tenant_id)
            .await
            .map_err(to_table_error),

        Ownership::DerivedFromParent {
            parent_table,
            parent_join_column,
        } => {
            let parent_keys = store
                .fetch_key_values(
                    parent_table,
                    PARENT_KEY_COLUMN,
                    PARENT_OWNER_COLUMN,
                    tenant_id,
                )
                .await
                .map_err(to_table_error)?;

            if parent_keys.is_empty() {
                tracing::debug!(
                    table = %table,
                    parent_table = %parent_table,
                    "No parent rows; skipping child query"
                );
                return Ok(Vec::new());
            }

            store
                .fetch_rows_in(table, parent_join_column, &parent_keys)
                .await
                .map_err(to_table_error)
        }
    }
}

//! Backing store abstraction
//!
//! This module defines the trait the export pipeline uses to read tenant-owned
//! rows and to enumerate tenants. Table and column names passed to these
//! methods come from the static manifest or from configuration; tenant values
//! are always bound as query parameters.

use crate::domain::ids::TenantId;
use crate::domain::{Record, Result, TenantProfile};
use async_trait::async_trait;

/// Query capability over the multi-tenant backing store
///
/// Implementations must quote table and column names as identifiers and must
/// never interpolate tenant values into query text.
#[async_trait]
pub trait TenantStore: Send + Sync {
    /// Fetch every row of `table` whose `owner_column` equals the tenant ID
    ///
    /// # Arguments
    ///
    /// * `table` - Table to read
    /// * `owner_column` - Column holding the owning tenant's ID
    /// * `tenant_id` - Tenant whose rows are wanted
    ///
    /// # Returns
    ///
    /// Rows in store order, each with its columns in table order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (missing table, permission, connection).
    async fn fetch_owned_rows(
        &self,
        table: &str,
        owner_column: &str,
        tenant_id: &TenantId,
    ) -> Result<Vec<Record>>;

    /// Fetch the `key_column` values of the tenant's rows in `table`
    ///
    /// Used to resolve parent identifiers for derived ownership. Values are
    /// returned in their text form.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn fetch_key_values(
        &self,
        table: &str,
        key_column: &str,
        owner_column: &str,
        tenant_id: &TenantId,
    ) -> Result<Vec<String>>;

    /// Fetch every row of `table` whose `column` matches one of `values`
    ///
    /// Callers never pass an empty `values` slice; implementations may still
    /// return an empty result for one without querying.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn fetch_rows_in(&self, table: &str, column: &str, values: &[String])
        -> Result<Vec<Record>>;

    /// List every tenant known to the directory, in a stable order
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    async fn list_tenants(&self) -> Result<Vec<TenantProfile>>;

    /// Look up the tenant type tag for one tenant
    ///
    /// # Returns
    ///
    /// `None` when the tenant has no directory entry or no tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup query fails.
    async fn tenant_type_tag(&self, tenant_id: &TenantId) -> Result<Option<String>>;

    /// Check that the store is reachable
    ///
    /// # Errors
    ///
    /// Returns an error if no connection can be made.
    async fn health_check(&self) -> Result<()>;

    /// Get the store type name (for logging/debugging)
    fn backend_name(&self) -> &str;
}

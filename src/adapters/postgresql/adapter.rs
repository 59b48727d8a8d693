//! PostgreSQL adapter implementing the tenant store trait

use crate::adapters::database::traits::TenantStore;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::postgresql::models::{
    quote_ident, record_from_row, select_keys, select_rows_any, select_rows_eq,
};
use crate::config::schema::DirectoryConfig;
use crate::domain::ids::TenantId;
use crate::domain::{FerryError, Record, Result, TenantProfile};
use async_trait::async_trait;
use std::sync::Arc;

/// PostgreSQL implementation of [`TenantStore`]
///
/// Tenants are enumerated from the configured directory table.
pub struct PostgreSQLStore {
    client: Arc<PostgreSQLClient>,
    directory: DirectoryConfig,
}

impl PostgreSQLStore {
    /// Create a new PostgreSQL store
    pub fn new(client: PostgreSQLClient, directory: DirectoryConfig) -> Self {
        Self {
            client: Arc::new(client),
            directory,
        }
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &Arc<PostgreSQLClient> {
        &self.client
    }

    fn list_tenants_sql(&self) -> String {
        let d = &self.directory;
        format!(
            "SELECT t.{id}::text, t.{email}::text, t.{ty}::text FROM {table} t ORDER BY t.{id}",
            id = quote_ident(&d.id_column),
            email = quote_ident(&d.email_column),
            ty = quote_ident(&d.type_column),
            table = quote_ident(&d.table),
        )
    }

    fn tenant_type_sql(&self) -> String {
        let d = &self.directory;
        format!(
            "SELECT t.{ty}::text FROM {table} t WHERE t.{id}::text = $1 LIMIT 1",
            ty = quote_ident(&d.type_column),
            table = quote_ident(&d.table),
            id = quote_ident(&d.id_column),
        )
    }
}

#[async_trait]
impl TenantStore for PostgreSQLStore {
    async fn fetch_owned_rows(
        &self,
        table: &str,
        owner_column: &str,
        tenant_id: &TenantId,
    ) -> Result<Vec<Record>> {
        let sql = select_rows_eq(table, owner_column);
        tracing::trace!(sql = %sql, "Fetching owned rows");

        let rows = self.client.query(&sql, &[&tenant_id.as_str()]).await?;
        rows.iter().map(record_from_row).collect()
    }

    async fn fetch_key_values(
        &self,
        table: &str,
        key_column: &str,
        owner_column: &str,
        tenant_id: &TenantId,
    ) -> Result<Vec<String>> {
        let sql = select_keys(table, key_column, owner_column);
        tracing::trace!(sql = %sql, "Fetching parent keys");

        let rows = self.client.query(&sql, &[&tenant_id.as_str()]).await?;
        let mut keys = Vec::with_capacity(rows.len());
        for row in rows {
            let key: Option<String> = row
                .try_get(0)
                .map_err(|e| FerryError::Database(format!("Failed to decode key: {e}")))?;
            keys.extend(key);
        }
        Ok(keys)
    }

    async fn fetch_rows_in(
        &self,
        table: &str,
        column: &str,
        values: &[String],
    ) -> Result<Vec<Record>> {
        if values.is_empty() {
            return Ok(Vec::new());
        }

        let sql = select_rows_any(table, column);
        tracing::trace!(sql = %sql, keys = values.len(), "Fetching derived rows");

        let values = values.to_vec();
        let rows = self.client.query(&sql, &[&values]).await?;
        rows.iter().map(record_from_row).collect()
    }

    async fn list_tenants(&self) -> Result<Vec<TenantProfile>> {
        let rows = self.client.query(&self.list_tenants_sql(), &[]).await?;

        let mut tenants = Vec::with_capacity(rows.len());
        for row in rows {
            let id: Option<String> = row
                .try_get(0)
                .map_err(|e| FerryError::Database(format!("Failed to decode tenant id: {e}")))?;
            let Some(tenant_id) = id.and_then(|id| TenantId::new(id).ok()) else {
                tracing::debug!("Skipping directory row without tenant id");
                continue;
            };

            let email: Option<String> = row
                .try_get(1)
                .map_err(|e| FerryError::Database(format!("Failed to decode email: {e}")))?;
            let tenant_type: Option<String> = row
                .try_get(2)
                .map_err(|e| FerryError::Database(format!("Failed to decode tenant type: {e}")))?;

            tenants.push(TenantProfile {
                tenant_id,
                email,
                tenant_type,
            });
        }

        Ok(tenants)
    }

    async fn tenant_type_tag(&self, tenant_id: &TenantId) -> Result<Option<String>> {
        let rows = self
            .client
            .query(&self.tenant_type_sql(), &[&tenant_id.as_str()])
            .await?;

        match rows.first() {
            Some(row) => row
                .try_get::<_, Option<String>>(0)
                .map_err(|e| FerryError::Database(format!("Failed to decode tenant type: {e}"))),
            None => Ok(None),
        }
    }

    async fn health_check(&self) -> Result<()> {
        self.client.test_connection().await?;
        let status = self.client.pool_status();
        tracing::debug!(
            target_db = %self.client.connection_string_safe(),
            pool_size = status.size,
            pool_available = status.available,
            "PostgreSQL store healthy"
        );
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "postgresql"
    }
}

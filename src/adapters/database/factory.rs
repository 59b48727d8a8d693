//! Store factory
//!
//! Builds the backing store from configuration.

use crate::adapters::database::traits::TenantStore;
use crate::adapters::postgresql::adapter::PostgreSQLStore;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::config::schema::FerryConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Create the tenant store described by the configuration
///
/// The connection pool is created lazily; no connection is opened here.
///
/// # Errors
///
/// Returns an error if the connection string cannot be parsed or the pool
/// cannot be built.
pub fn create_tenant_store(config: &FerryConfig) -> Result<Arc<dyn TenantStore>> {
    tracing::info!("Creating PostgreSQL tenant store");
    let client = PostgreSQLClient::new(&config.store)?;
    tracing::debug!(target_db = %client.connection_string_safe(), "Store pool ready");

    let store = PostgreSQLStore::new(client, config.directory.clone());
    Ok(Arc::new(store) as Arc<dyn TenantStore>)
}

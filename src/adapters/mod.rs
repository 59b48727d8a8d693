//! External system integrations for Ferry.
//!
//! This module provides adapters for the three collaborators the export
//! pipeline depends on:
//!
//! - [`database`] - Backing store abstraction ([`TenantStore`]) and factory
//! - [`postgresql`] - PostgreSQL implementation of the store
//! - [`identity`] - Credential resolution over HTTP
//! - [`mail`] - Message delivery over HTTP
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with in-memory implementations. The core only sees the
//! traits.
//!
//! # Example
//!
//! ```rust,no_run
//! use ferry::adapters::build_collaborators;
//! use ferry::config::load_config_from_env;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_from_env()?;
//! let (store, identity, transport) = build_collaborators(&config)?;
//! println!("store backend: {}", store.backend_name());
//! # let _ = (identity, transport);
//! # Ok(())
//! # }
//! ```
//!
//! [`TenantStore`]: database::TenantStore

pub mod database;
pub mod identity;
pub mod mail;
pub mod postgresql;

use crate::config::FerryConfig;
use crate::domain::Result;
use std::sync::Arc;

use database::TenantStore;
use identity::{HttpIdentityProvider, IdentityProvider};
use mail::{HttpMailTransport, MailTransport};

/// Production collaborators: store, identity provider and mail transport
pub type Collaborators = (
    Arc<dyn TenantStore>,
    Arc<dyn IdentityProvider>,
    Arc<dyn MailTransport>,
);

/// Build every production collaborator from configuration
///
/// # Errors
///
/// Returns an error if any client cannot be constructed.
pub fn build_collaborators(config: &FerryConfig) -> Result<Collaborators> {
    let store = database::create_tenant_store(config)?;
    let identity: Arc<dyn IdentityProvider> =
        Arc::new(HttpIdentityProvider::new(&config.identity)?);
    let transport: Arc<dyn MailTransport> = Arc::new(HttpMailTransport::new(&config.notifier)?);
    Ok((store, identity, transport))
}

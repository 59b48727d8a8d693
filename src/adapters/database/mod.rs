//! Backing store abstraction layer
//!
//! This module provides the trait the export pipeline reads tenant data
//! through, and the factory that builds the configured implementation.

pub mod factory;
pub mod traits;

pub use factory::create_tenant_store;
pub use traits::TenantStore;

//! PostgreSQL backing store
//!
//! This module provides the pooled client and the [`TenantStore`]
//! implementation over it.
//!
//! [`TenantStore`]: crate::adapters::database::TenantStore

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::PostgreSQLStore;
pub use client::PostgreSQLClient;

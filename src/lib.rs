// Ferry - Multi-tenant data export orchestrator
// Copyright (c) 2025 Ferry Contributors
// Licensed under the MIT License

//! # Ferry - Multi-tenant data export orchestrator
//!
//! Ferry exports every table a tenant owns from a shared PostgreSQL database
//! and mails the result to the tenant as one CSV attachment per table.
//!
//! ## Overview
//!
//! An invocation runs in one of two modes:
//! - **Manual**: a caller presents a bearer credential; their own tenant is
//!   exported and mailed to their registered address
//! - **Sweep**: no credential; every tenant in the directory that has an
//!   address is exported, one after another
//!
//! Which tables belong to a tenant is static data (the manifest registry):
//! a shared list plus a list per tenant type. A table is owned either
//! directly through an owner column or indirectly through a parent table.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`server`] - HTTP surface (axum router, CORS, status mapping)
//! - [`core`] - Manifest registry, table exporter, export job, notifier, orchestrator
//! - [`adapters`] - External integrations (PostgreSQL, identity provider, mail API)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ferry::config::load_config_from_env;
//! use ferry::core::orchestrator::{ExportCommand, ExportOutcome, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_from_env()?;
//!     let orchestrator = Orchestrator::from_config(&config)?;
//!
//!     let command = ExportCommand::from_credential(Some("user-jwt".to_string()));
//!     if let ExportOutcome::Manual(result) = orchestrator.execute(command).await? {
//!         println!("Exported {} tables", result.row_counts.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Ferry uses [`domain::FerryError`] for all library errors. Only the
//! configuration, credential and recipient checks abort an invocation; a
//! failing tenant or table is recorded and the run continues.
//!
//! ## Logging
//!
//! Ferry uses structured logging with the `tracing` crate. Each invocation
//! runs inside an `export` span carrying a `run_id`:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(tenant_id = "a1b2", tables = 8, "Starting tenant export");
//! warn!(table = "payments", "Table export failed");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod server;

//! Core business logic for Ferry.
//!
//! # Modules
//!
//! - [`manifest`] - Static table manifests per tenant type
//! - [`export`] - Table export, CSV serialization and the tenant export job
//! - [`notify`] - Message formatting and dispatch
//! - [`orchestrator`] - Manual and sweep invocations
//!
//! # Export Workflow
//!
//! 1. **Decide the command**: a credential means manual mode, none means sweep
//! 2. **Resolve tenants**: the caller's identity, or every tenant in the directory
//! 3. **Resolve manifest**: shared tables plus the tenant type's tables
//! 4. **Export tables**: sequentially, isolating each table's failure
//! 5. **Notify**: one message per tenant with one CSV per non-empty table
//! 6. **Report**: the tenant's result, or an aggregated sweep report
//!
//! # Example
//!
//! ```rust,no_run
//! use ferry::adapters::build_collaborators;
//! use ferry::config::load_config_from_env;
//! use ferry::core::notify::Notifier;
//! use ferry::core::orchestrator::{ExportCommand, ExportOutcome, ExportSettings, Orchestrator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_from_env()?;
//! let (store, identity, transport) = build_collaborators(&config)?;
//! let notifier = Notifier::from_config(&config.notifier, transport, config.export.dry_run);
//! let orchestrator =
//!     Orchestrator::new(store, identity, notifier, ExportSettings::from(&config.export));
//!
//! if let ExportOutcome::Sweep(report) = orchestrator.execute(ExportCommand::Sweep).await? {
//!     println!("{} succeeded, {} failed", report.succeeded(), report.failed());
//! }
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod manifest;
pub mod notify;
pub mod orchestrator;

//! Export command implementation
//!
//! This module implements the `export` command: one invocation of the export
//! function run directly from the command line. With `--token` the caller's
//! tenant is exported; without it every tenant in the directory is swept.

use super::load_or_report;
use crate::core::orchestrator::{ExportCommand, ExportOutcome, Orchestrator};
use crate::domain::FerryError;
use crate::server::handlers::{manual_response, sweep_response};
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Bearer credential of the tenant to export; omit to sweep all tenants
    #[arg(long, env = "FERRY_EXPORT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Dry run mode - build every bundle but don't send anything
    #[arg(long)]
    pub dry_run: bool,

    /// Override the number of tenants exported at once during a sweep
    #[arg(long)]
    pub concurrency: Option<usize>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_or_report(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.export.dry_run = true;
        }

        if let Some(concurrency) = self.concurrency {
            tracing::info!(concurrency, "Overriding sweep concurrency from CLI");
            config.export.sweep_concurrency = concurrency;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        if config.export.dry_run {
            println!("🔍 DRY RUN MODE - No messages will be sent");
            println!();
        }

        let orchestrator = match Orchestrator::from_config(&config) {
            Ok(o) => o,
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize export");
                eprintln!("Failed to initialize export: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if let Err(e) = orchestrator.check_store().await {
            tracing::error!(error = %e, "Backing store is unreachable");
            eprintln!("❌ Backing store is unreachable: {e}");
            return Ok(4);
        }

        let command = ExportCommand::from_credential(self.token.clone());
        println!(
            "🚀 Starting {} export...",
            match command {
                ExportCommand::Manual { .. } => "manual",
                ExportCommand::Sweep => "sweep",
            }
        );
        println!();

        let outcome = match orchestrator.execute(command).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("❌ Export failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let (body, exit_code) = match &outcome {
            ExportOutcome::Manual(result) => match manual_response(result) {
                Ok(body) => (body, 0),
                Err(e) => (serde_json::json!({ "error": e.to_string() }), 1),
            },
            ExportOutcome::Sweep(report) => {
                (sweep_response(report), if report.failed() > 0 { 1 } else { 0 })
            }
        };

        println!("{}", serde_json::to_string_pretty(&body)?);
        println!();

        if exit_code == 0 {
            println!("✅ Export completed successfully!");
        } else {
            println!("⚠️  Export completed with failures");
        }

        Ok(exit_code)
    }
}

/// Exit code for an invocation-level failure
pub fn exit_code_for(error: &FerryError) -> i32 {
    match error {
        FerryError::Configuration(_) => 2,
        FerryError::Unauthorized(_) | FerryError::MissingRecipient(_) => 3,
        _ => 5,
    }
}

//! Serve command implementation
//!
//! Runs the export function behind the HTTP router until a shutdown signal
//! arrives.

use super::load_or_report;
use crate::core::manifest;
use crate::core::orchestrator::Orchestrator;
use crate::server;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override the bind host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the bind port
    #[arg(long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let mut config = match load_or_report(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        if let Err(e) = manifest::validate_all() {
            tracing::error!(error = %e, "Built-in manifest is invalid");
            eprintln!("❌ Built-in manifest is invalid: {e}");
            return Ok(2);
        }

        let orchestrator = match Orchestrator::from_config(&config) {
            Ok(o) => o,
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize export function");
                eprintln!("Failed to initialize export function: {e}");
                return Ok(5);
            }
        };

        if let Err(e) = orchestrator.ensure_ready() {
            tracing::warn!(error = %e, "Every invocation will fail until this is fixed");
        }

        println!("🚀 Serving on http://{}", config.server.bind_address());

        let mut signal = shutdown_signal;
        let shutdown = async move {
            let _ = signal.wait_for(|stop| *stop).await;
        };

        server::run_with_shutdown(orchestrator, &config.server, shutdown).await?;

        tracing::info!("Server stopped");
        Ok(0)
    }
}

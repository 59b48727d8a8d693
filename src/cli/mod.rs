//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Ferry using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Ferry - multi-tenant data export orchestrator
#[derive(Parser, Debug)]
#[command(name = "ferry")]
#[command(version, about, long_about = None)]
#[command(author = "Ferry Contributors")]
pub struct Cli {
    /// Path to configuration file (optional; environment is used when absent)
    #[arg(short, long, default_value = "ferry.toml", env = "FERRY_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FERRY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the export function over HTTP
    Serve(commands::serve::ServeArgs),

    /// Run one export invocation (manual with --token, sweep without)
    Export(commands::export::ExportArgs),

    /// Validate configuration and the built-in manifests
    ValidateConfig(commands::validate::ValidateArgs),

    /// Print the table manifest for a tenant type
    Manifest(commands::manifest::ManifestArgs),
}

impl Commands {
    /// Whether the command needs a loaded configuration
    pub fn needs_config(&self) -> bool {
        !matches!(self, Commands::Manifest(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["ferry", "export"]);
        assert_eq!(cli.config, "ferry.toml");
        match cli.command {
            Commands::Export(args) => assert!(args.token.is_none()),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_export_with_token() {
        let cli = Cli::parse_from(["ferry", "export", "--token", "abc"]);
        match cli.command {
            Commands::Export(args) => assert_eq!(args.token.as_deref(), Some("abc")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["ferry", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["ferry", "--log-level", "debug", "validate-config"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_validate_check_connection() {
        let cli = Cli::parse_from(["ferry", "validate-config", "--check-connection"]);
        match cli.command {
            Commands::ValidateConfig(args) => assert!(args.check_connection),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_serve_overrides() {
        let cli = Cli::parse_from(["ferry", "serve", "--host", "0.0.0.0", "--port", "9000"]);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
                assert_eq!(args.port, Some(9000));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_manifest() {
        let cli = Cli::parse_from(["ferry", "manifest", "--tenant-type", "school"]);
        assert!(!cli.command.needs_config());
        match cli.command {
            Commands::Manifest(args) => assert_eq!(args.tenant_type.as_deref(), Some("school")),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

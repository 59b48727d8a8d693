//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable or JSON console output
//! - Configurable log levels (overridable with `RUST_LOG`)
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use ferry::logging::init_logging;
//! use ferry::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of a tenant export
///
/// # Example
///
/// ```no_run
/// use ferry::log_tenant_export_start;
/// use ferry::domain::{TenantId, TenantType};
///
/// let tenant_id = TenantId::new("user-123").unwrap();
/// log_tenant_export_start!(&tenant_id, TenantType::School, 9);
/// ```
#[macro_export]
macro_rules! log_tenant_export_start {
    ($tenant_id:expr, $tenant_type:expr, $table_count:expr) => {
        tracing::info!(
            tenant_id = %$tenant_id,
            tenant_type = %$tenant_type,
            tables = $table_count,
            "Starting tenant export"
        );
    };
}

/// Log the outcome of a single table export
///
/// # Example
///
/// ```no_run
/// use ferry::log_table_exported;
///
/// log_table_exported!("invoices", 42);
/// ```
#[macro_export]
macro_rules! log_table_exported {
    ($table:expr, $rows:expr) => {
        tracing::debug!(table = $table, rows = $rows, "Table exported");
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use ferry::log_error_with_context;
/// use ferry::domain::FerryError;
///
/// let error = FerryError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log sweep progress
///
/// # Example
///
/// ```no_run
/// use ferry::log_sweep_progress;
///
/// log_sweep_progress!(10, 250);
/// ```
#[macro_export]
macro_rules! log_sweep_progress {
    ($current:expr, $total:expr) => {
        tracing::debug!(
            current = $current,
            total = $total,
            progress_pct = ($current as f64 / $total as f64 * 100.0),
            "Sweep progress"
        );
    };
}

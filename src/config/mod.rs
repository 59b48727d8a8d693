//! Configuration management for Ferry.
//!
//! Ferry reads an optional TOML file, substitutes `${VAR_NAME}` placeholders
//! from the environment, applies `FERRY_<SECTION>_<KEY>` overrides and then
//! validates the result. Without a file the configuration is built from
//! defaults plus the environment, which is how the service normally runs.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ferry::config::load_config_or_env;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_env(Some("ferry.toml"))?;
//! println!("Listening on {}", config.server.bind_address());
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "production"
//!
//! [store]
//! connection_string = "${DATABASE_URL}"
//! ssl_mode = "require"
//!
//! [identity]
//! base_url = "https://project.example.com/auth/v1"
//! api_key = "${AUTH_ANON_KEY}"
//!
//! [notifier]
//! api_key = "${MAIL_API_KEY}"
//! from_address = "Backups <backups@example.com>"
//!
//! [export]
//! sweep_concurrency = 4
//! tenant_timeout_secs = 300
//! ```
//!
//! # Required values
//!
//! - `store.connection_string` (`FERRY_STORE_CONNECTION_STRING`): validated on load
//! - `notifier.api_key` (`FERRY_NOTIFIER_API_KEY`): checked before each invocation

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_env, load_config_or_env};
pub use schema::{
    ApplicationConfig, DirectoryConfig, Environment, ExportConfig, FerryConfig, IdentityConfig,
    LoggingConfig, NotifierConfig, ServerConfig, StoreConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};

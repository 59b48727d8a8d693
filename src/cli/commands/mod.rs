//! CLI command implementations
//!
//! Exit codes shared by the commands:
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | At least one tenant export or delivery failed |
//! | 2 | Configuration error |
//! | 3 | Credential rejected or no contactable address |
//! | 4 | Backing store unreachable |
//! | 5 | Fatal error |

pub mod export;
pub mod manifest;
pub mod serve;
pub mod validate;

use crate::config::{load_config_or_env, FerryConfig};

/// Load configuration, printing the failure the way every command does
///
/// Returns `Err(2)` (the configuration exit code) on failure.
pub(crate) fn load_or_report(config_path: &str) -> Result<FerryConfig, i32> {
    match load_config_or_env(Some(config_path)) {
        Ok(config) => Ok(config),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            eprintln!("❌ Failed to load configuration");
            eprintln!("   Error: {e}");
            Err(2)
        }
    }
}

//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::FerryConfig;
use super::secret::secret_string;
use crate::domain::errors::FerryError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into FerryConfig
/// 4. Applies environment variable overrides (FERRY_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, a referenced variable is
/// missing, the TOML does not parse, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use ferry::config::loader::load_config;
///
/// let config = load_config("ferry.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<FerryConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FerryError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        FerryError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: FerryConfig = toml::from_str(&contents)
        .map_err(|e| FerryError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;
    finish(config)
}

/// Builds configuration from defaults and `FERRY_*` environment variables only
///
/// Used when no configuration file is present, e.g. in container deployments.
pub fn load_config_from_env() -> Result<FerryConfig> {
    let mut config = FerryConfig::default();
    apply_env_overrides(&mut config)?;
    finish(config)
}

/// Loads from `path` when it exists, otherwise from the environment alone
pub fn load_config_or_env(path: Option<&str>) -> Result<FerryConfig> {
    match path {
        Some(p) if Path::new(p).exists() => load_config(p),
        Some(p) => {
            tracing::debug!(path = %p, "Configuration file not present, using environment");
            load_config_from_env()
        }
        None => load_config_from_env(),
    }
}

fn finish(config: FerryConfig) -> Result<FerryConfig> {
    config.validate().map_err(|e| {
        FerryError::Configuration(format!("Configuration validation failed: {e}"))
    })?;
    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| FerryError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(FerryError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Applies environment variable overrides using FERRY_* prefix
///
/// Environment variables follow the pattern: FERRY_<SECTION>_<KEY>
/// For example: FERRY_STORE_CONNECTION_STRING, FERRY_NOTIFIER_API_KEY
fn apply_env_overrides(config: &mut FerryConfig) -> Result<()> {
    // Application
    if let Ok(val) = std::env::var("FERRY_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("FERRY_ENVIRONMENT") {
        config.environment = match val.to_lowercase().as_str() {
            "production" => super::schema::Environment::Production,
            "staging" => super::schema::Environment::Staging,
            "development" => super::schema::Environment::Development,
            other => {
                return Err(FerryError::Configuration(format!(
                    "Invalid FERRY_ENVIRONMENT '{other}'"
                )))
            }
        };
    }

    // Store
    if let Ok(val) = std::env::var("FERRY_STORE_CONNECTION_STRING") {
        config.store.connection_string = Some(secret_string(val));
    }
    if let Some(max) = env_parse("FERRY_STORE_MAX_CONNECTIONS") {
        config.store.max_connections = max;
    }
    if let Ok(val) = std::env::var("FERRY_STORE_SSL_MODE") {
        config.store.ssl_mode = val;
    }

    // Directory
    if let Ok(val) = std::env::var("FERRY_DIRECTORY_TABLE") {
        config.directory.table = val;
    }

    // Identity
    if let Ok(val) = std::env::var("FERRY_IDENTITY_BASE_URL") {
        config.identity.base_url = val;
    }
    if let Ok(val) = std::env::var("FERRY_IDENTITY_API_KEY") {
        config.identity.api_key = Some(secret_string(val));
    }

    // Notifier
    if let Ok(val) = std::env::var("FERRY_NOTIFIER_BASE_URL") {
        config.notifier.base_url = val;
    }
    if let Ok(val) = std::env::var("FERRY_NOTIFIER_API_KEY") {
        config.notifier.api_key = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("FERRY_NOTIFIER_FROM_ADDRESS") {
        config.notifier.from_address = val;
    }
    if let Ok(val) = std::env::var("FERRY_NOTIFIER_SUBJECT") {
        config.notifier.subject = val;
    }

    // Export
    if let Some(concurrency) = env_parse("FERRY_EXPORT_SWEEP_CONCURRENCY") {
        config.export.sweep_concurrency = concurrency;
    }
    if let Some(timeout) = env_parse("FERRY_EXPORT_TENANT_TIMEOUT_SECS") {
        config.export.tenant_timeout_secs = timeout;
    }
    if let Ok(val) = std::env::var("FERRY_EXPORT_DRY_RUN") {
        config.export.dry_run = val.parse().unwrap_or(false);
    }

    // Server
    if let Ok(val) = std::env::var("FERRY_SERVER_HOST") {
        config.server.host = val;
    }
    if let Some(port) = env_parse("FERRY_SERVER_PORT") {
        config.server.port = port;
    }

    // Logging
    if let Ok(val) = std::env::var("FERRY_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("FERRY_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("FERRY_LOGGING_JSON_CONSOLE") {
        config.logging.json_console = val.parse().unwrap_or(false);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("FERRY_TEST_SUBST_VAR", "test_value");
        let input = "api_key = \"${FERRY_TEST_SUBST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "api_key = \"test_value\"\n");
        std::env::remove_var("FERRY_TEST_SUBST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("FERRY_TEST_MISSING_VAR");
        let input = "api_key = \"${FERRY_TEST_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("FERRY_TEST_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# api_key = \"${FERRY_TEST_NEVER_SET}\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${FERRY_TEST_NEVER_SET}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(FerryError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[store]
connection_string = "postgresql://ferry:pw@localhost:5432/app"
max_connections = 4

[notifier]
api_key = "re_test"
from_address = "Backups <backups@example.com>"

[export]
sweep_concurrency = 2
tenant_timeout_secs = 60
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.store.max_connections, 4);
        assert_eq!(config.export.sweep_concurrency, 2);
        assert!(config.notifier.has_api_key());
        assert_eq!(config.directory.table, "profiles");
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let toml_content = r#"
[store]
connection_string = "postgresql://localhost/app"

[export]
sweep_concurrency = 0
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("sweep_concurrency"));
    }
}

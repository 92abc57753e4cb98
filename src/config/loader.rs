//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::SlotSyncConfig;
use crate::config::secret_string;
use crate::domain::errors::SyncError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into SlotSyncConfig
/// 4. Applies environment variable overrides (SLOTSYNC_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use slotsync::config::loader::load_config;
///
/// let config = load_config("slotsync.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SlotSyncConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SyncError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SyncError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: SlotSyncConfig = toml::from_str(&contents)
        .map_err(|e| SyncError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        SyncError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| SyncError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(SyncError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using the SLOTSYNC_* prefix
///
/// Variables follow the pattern SLOTSYNC_<SECTION>_<KEY>, for example
/// SLOTSYNC_DOCTORS_API_BASE_URL or SLOTSYNC_APPLICATION_DRY_RUN.
fn apply_env_overrides(config: &mut SlotSyncConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("SLOTSYNC_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("SLOTSYNC_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Doctors API overrides
    if let Ok(val) = std::env::var("SLOTSYNC_DOCTORS_API_BASE_URL") {
        config.doctors_api.base_url = val;
    }
    if let Ok(val) = std::env::var("SLOTSYNC_DOCTORS_API_USERNAME") {
        config.doctors_api.username = val;
    }
    if let Ok(val) = std::env::var("SLOTSYNC_DOCTORS_API_PASSWORD") {
        config.doctors_api.password = secret_string(val);
    }
    if let Ok(val) = std::env::var("SLOTSYNC_DOCTORS_API_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.doctors_api.timeout_seconds = Some(timeout);
        }
    }

    // Database overrides
    if let Ok(val) = std::env::var("SLOTSYNC_DATABASE_TARGET") {
        config.database_target = val.parse().map_err(SyncError::Configuration)?;
    }
    if let Some(ref mut pg_config) = config.postgresql {
        if let Ok(val) = std::env::var("SLOTSYNC_POSTGRESQL_CONNECTION_STRING") {
            pg_config.connection_string = secret_string(val);
        }
        if let Ok(val) = std::env::var("SLOTSYNC_POSTGRESQL_MAX_CONNECTIONS") {
            if let Ok(max) = val.parse() {
                pg_config.max_connections = max;
            }
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("SLOTSYNC_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("SLOTSYNC_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
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
        std::env::set_var("SLOTSYNC_LOADER_TEST_VAR", "test_value");
        let input = "password = \"${SLOTSYNC_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"");
        std::env::remove_var("SLOTSYNC_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("SLOTSYNC_LOADER_MISSING_VAR");
        let input = "password = \"${SLOTSYNC_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("SLOTSYNC_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let input = "# password = \"${SLOTSYNC_LOADER_COMMENTED_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
database_target = "memory"

[application]
log_level = "info"

[doctors_api]
base_url = "https://doctors.example.com"
username = "user"
password = "pass"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.doctors_api.base_url, "https://doctors.example.com");
        assert_eq!(config.doctors_api.timeout_seconds, None);
        assert!(config.logging.muted_weekdays.is_empty());
    }
}

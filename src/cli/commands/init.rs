//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "slotsync.toml")]
    pub output: String,

    /// Include comments explaining every option
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing slotsync configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set database_target to 'postgresql' or 'memory'");
                println!("  3. Create a .env file with your credentials:");
                println!("     - BASE_DOCTORS_API_URL");
                println!("     - DOCTORS_API_USER and DOCTORS_API_PASSWORD");
                println!("     - SLOTSYNC_PG_URL (if using PostgreSQL)");
                println!("  4. Validate configuration: slotsync validate-config");
                println!("  5. Run a synchronization: slotsync sync");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# slotsync Configuration File

database_target = "postgresql"  # postgresql | memory
environment = "development"

[application]
log_level = "info"
dry_run = false

[doctors_api]
base_url = "${BASE_DOCTORS_API_URL}"
username = "${DOCTORS_API_USER}"
password = "${DOCTORS_API_PASSWORD}"
tls_verify = true

[postgresql]
connection_string = "${SLOTSYNC_PG_URL}"
max_connections = 10

[logging]
local_enabled = true
local_path = "/var/log/slotsync"
local_rotation = "daily"
muted_weekdays = []
"#
        .to_string()
    }

    /// Generate configuration with comments
    fn generate_config_with_examples() -> String {
        r#"# slotsync Configuration File
#
# Values of the form ${NAME} are replaced with environment variables when the
# file is loaded. Any SLOTSYNC_<SECTION>_<KEY> environment variable overrides
# the matching setting.

# ============================================================================
# Database Target Selection
# ============================================================================
# postgresql: persistent storage (requires the [postgresql] section)
# memory:     in-process storage, discarded when the run ends
database_target = "postgresql"

# development | staging | production
# TLS verification cannot be disabled in production.
environment = "development"

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Reconcile without committing anything
dry_run = false

# ============================================================================
# Doctors API
# ============================================================================
[doctors_api]
# Base URL; /api/doctors and /api/doctors/{id}/slots are appended
base_url = "${BASE_DOCTORS_API_URL}"

# HTTP Basic credentials
username = "${DOCTORS_API_USER}"
password = "${DOCTORS_API_PASSWORD}"

# Request timeout in seconds; leave unset to wait indefinitely
# timeout_seconds = 30

# Verify TLS certificates
tls_verify = true

# ============================================================================
# PostgreSQL
# ============================================================================
[postgresql]
connection_string = "${SLOTSYNC_PG_URL}"

# Pool size (1-100)
max_connections = 10

# Seconds to wait for a pooled connection
connection_timeout_seconds = 30

# Per-statement timeout in seconds
statement_timeout_seconds = 60

# ============================================================================
# Logging
# ============================================================================
[logging]
# Write JSON log files in addition to console output
local_enabled = true
local_path = "/var/log/slotsync"

# daily | hourly | never
local_rotation = "daily"

# Weekdays on which nothing is logged, e.g. ["sun"]
muted_weekdays = []
"#
        .to_string()
    }
}

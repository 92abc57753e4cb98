//! Configuration management for slotsync.
//!
//! # Overview
//!
//! slotsync reads a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `SLOTSYNC_*` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! database_target = "postgresql"
//!
//! [application]
//! log_level = "info"
//!
//! [doctors_api]
//! base_url = "${BASE_DOCTORS_API_URL}"
//! username = "${DOCTORS_API_USER}"
//! password = "${DOCTORS_API_PASSWORD}"
//!
//! [postgresql]
//! connection_string = "${SLOTSYNC_PG_URL}"
//!
//! [logging]
//! local_path = "/var/log/slotsync"
//! muted_weekdays = ["sun"]
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use slotsync::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("slotsync.toml")?;
//! println!("Doctors API: {}", config.doctors_api.base_url);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, DatabaseTarget, DoctorsApiConfig, Environment, LoggingConfig,
    PostgreSQLConfig, SlotSyncConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};

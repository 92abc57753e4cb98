//! Sync command implementation
//!
//! This module implements the `sync` command, which runs one synchronization
//! pass from the doctors API into the configured store.

use crate::adapters::doctors::HttpDoctorsSource;
use crate::adapters::store::create_store;
use crate::config::{load_config, SlotSyncConfig};
use crate::core::sync::DoctorSlotsSynchronizer;
use crate::domain::SyncError;
use clap::Args;
use std::sync::Arc;

/// Message printed after a successful run
pub const SUCCESS_MESSAGE: &str = "Doctor slots synchronized successfully.";

/// Message printed after a dry run, when nothing was written
pub const DRY_RUN_MESSAGE: &str = "Dry run complete. No changes were written to the database.";

fn completion_message(dry_run: bool) -> &'static str {
    if dry_run {
        DRY_RUN_MESSAGE
    } else {
        SUCCESS_MESSAGE
    }
}

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Dry run mode - fetch and reconcile without writing to the database
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    /// Execute the sync command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting sync command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        self.run(&config).await
    }

    /// Run the synchronization against an already loaded configuration
    pub async fn run(&self, config: &SlotSyncConfig) -> anyhow::Result<i32> {
        let dry_run = config.application.dry_run;
        if dry_run {
            println!("🔍 DRY RUN MODE - No data will be written to the database");
            println!();
        }

        let source = match HttpDoctorsSource::new(&config.doctors_api) {
            Ok(s) => Arc::new(s),
            Err(e) => {
                eprintln!("Failed to create doctors API client: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let store = match create_store(config) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Failed to create store: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if let Err(e) = store.test_connection().await {
            tracing::error!(error = %e, "Store connection failed");
            eprintln!("Failed to connect to database: {e}");
            return Ok(4); // Connection error exit code
        }

        if let Err(e) = store.ensure_schema().await {
            tracing::error!(error = %e, "Failed to prepare database schema");
            eprintln!("Failed to prepare database schema: {e}");
            return Ok(4); // Connection error exit code
        }

        let synchronizer = DoctorSlotsSynchronizer::new(source, store).with_dry_run(dry_run);

        match synchronizer.synchronize().await {
            Ok(summary) => {
                summary.log_summary();
                println!("{}", completion_message(summary.dry_run));
                Ok(0)
            }
            Err(SyncError::Fetch(e)) => {
                eprintln!("Failed to fetch doctors: {e}");
                Ok(4) // Connection error exit code
            }
            Err(e) => {
                tracing::error!(error = %e, "Synchronization failed");
                eprintln!("Synchronization failed: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{secret_string, DatabaseTarget};

    fn memory_config(base_url: &str) -> SlotSyncConfig {
        let mut config = SlotSyncConfig {
            database_target: DatabaseTarget::Memory,
            ..SlotSyncConfig::default()
        };
        config.doctors_api.base_url = base_url.to_string();
        config.doctors_api.username = "user".to_string();
        config.doctors_api.password = secret_string("pass".to_string());
        config
    }

    #[tokio::test]
    async fn test_sync_success_exit_code() {
        let mut server = mockito::Server::new_async().await;
        let _doctors = server
            .mock("GET", "/api/doctors")
            .with_status(200)
            .with_body(r#"[{"id":1,"name":"john doe"}]"#)
            .create_async()
            .await;
        let _slots = server
            .mock("GET", "/api/doctors/1/slots")
            .with_status(200)
            .with_body(r#"[{"start":"2023-07-01T10:00:00+00:00","end":"2023-07-01T11:00:00+00:00"}]"#)
            .create_async()
            .await;

        let args = SyncArgs { dry_run: false };
        let code = args.run(&memory_config(&server.url())).await.unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_completion_message() {
        assert_eq!(completion_message(false), SUCCESS_MESSAGE);
        assert_eq!(completion_message(true), DRY_RUN_MESSAGE);
        assert!(!DRY_RUN_MESSAGE.contains("synchronized successfully"));
    }

    #[tokio::test]
    async fn test_sync_dry_run_exit_code() {
        let mut server = mockito::Server::new_async().await;
        let _doctors = server
            .mock("GET", "/api/doctors")
            .with_status(200)
            .with_body(r#"[{"id":1,"name":"john doe"}]"#)
            .create_async()
            .await;
        let _slots = server
            .mock("GET", "/api/doctors/1/slots")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let mut config = memory_config(&server.url());
        config.application.dry_run = true;

        let args = SyncArgs { dry_run: true };
        let code = args.run(&config).await.unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_sync_doctor_list_failure_exit_code() {
        let mut server = mockito::Server::new_async().await;
        let _doctors = server
            .mock("GET", "/api/doctors")
            .with_status(503)
            .create_async()
            .await;

        let args = SyncArgs { dry_run: false };
        let code = args.run(&memory_config(&server.url())).await.unwrap();
        assert_eq!(code, 4);
    }

    #[tokio::test]
    async fn test_sync_missing_config_exit_code() {
        let args = SyncArgs { dry_run: false };
        let code = args.execute("/nonexistent/slotsync.toml").await.unwrap();
        assert_eq!(code, 2);
    }
}

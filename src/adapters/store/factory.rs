//! Store factory
//!
//! This module provides the factory function that picks a storage backend
//! based on configuration.

use super::memory::MemoryStore;
use super::traits::SlotStore;
use crate::adapters::postgresql::{PostgreSQLAdapter, PostgreSQLClient};
use crate::config::schema::{DatabaseTarget, SlotSyncConfig};
use crate::domain::{Result, SyncError};
use std::sync::Arc;

/// Create a store based on the configuration
///
/// # Errors
///
/// Returns an error if the selected backend cannot be created.
pub fn create_store(config: &SlotSyncConfig) -> Result<Arc<dyn SlotStore + Send + Sync>> {
    match config.database_target {
        DatabaseTarget::PostgreSQL => {
            let pg_config = config.postgresql.as_ref().ok_or_else(|| {
                SyncError::Configuration(
                    "postgresql configuration is required when database_target = \"postgresql\""
                        .to_string(),
                )
            })?;

            tracing::info!("Creating PostgreSQL store");
            let client = PostgreSQLClient::new(pg_config.clone())?;
            Ok(Arc::new(PostgreSQLAdapter::new(client)) as Arc<dyn SlotStore + Send + Sync>)
        }
        DatabaseTarget::Memory => {
            tracing::warn!("Using the in-memory store; nothing will outlive this process");
            Ok(Arc::new(MemoryStore::new()) as Arc<dyn SlotStore + Send + Sync>)
        }
    }
}

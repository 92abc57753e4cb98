//! Persistence store traits
//!
//! This module defines the trait that storage backends must implement to hold
//! doctors and their slots.

use crate::domain::ids::DoctorId;
use crate::domain::{Doctor, Slot, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage for doctors and the slots they own
///
/// Reads return detached copies. Nothing a caller does to a returned value is
/// persisted until it is passed to [`SlotStore::commit_all`].
#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Short backend name used in logs
    fn backend_name(&self) -> &'static str;

    /// Test the store connection
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    async fn test_connection(&self) -> Result<(), StoreError>;

    /// Create tables if they do not exist yet
    async fn ensure_schema(&self) -> Result<(), StoreError>;

    /// Look up a doctor together with all of its slots
    async fn find_doctor(&self, id: &DoctorId) -> Result<Option<Doctor>, StoreError>;

    /// Look up a slot by its logical identity
    async fn find_slot(
        &self,
        doctor_id: &DoctorId,
        start: DateTime<Utc>,
    ) -> Result<Option<Slot>, StoreError>;

    /// List every stored doctor with its slots, ordered by id
    async fn list_doctors(&self) -> Result<Vec<Doctor>, StoreError>;

    /// Persist a batch of doctors and their slots atomically
    ///
    /// Doctors and slots are inserted or updated by id. A slot's `created_at`
    /// is written on insert only. Either the whole batch is applied or none
    /// of it is.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::CommitFailed` if any row is rejected; in that case
    /// the store is left exactly as it was.
    async fn commit_all(&self, doctors: &[Doctor]) -> Result<(), StoreError>;
}

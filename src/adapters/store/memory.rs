//! In-process store
//!
//! Backs the `memory` database target and the test suites. Commits are
//! validated in full before anything is written, which gives the same
//! all-or-nothing behaviour as a database transaction.

use super::traits::SlotStore;
use crate::domain::ids::DoctorId;
use crate::domain::{Doctor, Slot, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Store that keeps everything in a map behind a lock
#[derive(Debug, Default)]
pub struct MemoryStore {
    doctors: RwLock<BTreeMap<DoctorId, Doctor>>,
    fail_commits: AtomicBool,
    commits: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds the given doctors
    pub fn with_doctors(doctors: Vec<Doctor>) -> Self {
        let map = doctors
            .into_iter()
            .map(|doctor| (doctor.id().clone(), doctor))
            .collect();

        Self {
            doctors: RwLock::new(map),
            ..Self::default()
        }
    }

    /// Make every following commit fail (or succeed again)
    pub fn set_fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    /// Number of commits that were applied
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    /// Copy of every stored doctor
    pub async fn snapshot(&self) -> Vec<Doctor> {
        self.doctors.read().await.values().cloned().collect()
    }

    /// Merge one incoming doctor with its stored copy
    fn merge(stored: Option<&Doctor>, incoming: &Doctor) -> Result<Doctor, StoreError> {
        let mut slots: Vec<Slot> = stored.map(|d| d.slots().to_vec()).unwrap_or_default();

        for slot in incoming.slots() {
            if slot.doctor_id() != incoming.id() {
                return Err(StoreError::CommitFailed(format!(
                    "Slot {} belongs to doctor {} but was saved with doctor {}",
                    slot.id(),
                    slot.doctor_id(),
                    incoming.id()
                )));
            }

            match slots.iter_mut().find(|s| s.id() == slot.id()) {
                // created_at is fixed at insert time
                Some(existing) => {
                    *existing = Slot::restore(
                        slot.id(),
                        slot.doctor_id().clone(),
                        slot.start(),
                        slot.end(),
                        existing.created_at(),
                    )
                }
                None => slots.push(slot.clone()),
            }
        }

        let mut starts = HashSet::new();
        for slot in &slots {
            if !starts.insert(slot.start()) {
                return Err(StoreError::CommitFailed(format!(
                    "Duplicate slot start {} for doctor {}",
                    slot.start(),
                    incoming.id()
                )));
            }
        }

        slots.sort_by_key(|s| s.start());

        Ok(Doctor::restore(
            incoming.id().clone(),
            incoming.name().to_string(),
            incoming.has_error(),
            slots,
        ))
    }
}

#[async_trait]
impl SlotStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn test_connection(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find_doctor(&self, id: &DoctorId) -> Result<Option<Doctor>, StoreError> {
        Ok(self.doctors.read().await.get(id).cloned())
    }

    async fn find_slot(
        &self,
        doctor_id: &DoctorId,
        start: DateTime<Utc>,
    ) -> Result<Option<Slot>, StoreError> {
        Ok(self
            .doctors
            .read()
            .await
            .get(doctor_id)
            .and_then(|doctor| doctor.slot_starting_at(start))
            .cloned())
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>, StoreError> {
        Ok(self.snapshot().await)
    }

    async fn commit_all(&self, doctors: &[Doctor]) -> Result<(), StoreError> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(StoreError::CommitFailed(
                "Memory store configured to reject commits".to_string(),
            ));
        }

        let mut stored = self.doctors.write().await;

        // Build the full result first so a rejected row leaves the map untouched
        let mut merged = Vec::with_capacity(doctors.len());
        for doctor in doctors {
            merged.push(Self::merge(stored.get(doctor.id()), doctor)?);
        }

        for doctor in merged {
            stored.insert(doctor.id().clone(), doctor);
        }

        self.commits.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(doctors = doctors.len(), "Memory store commit applied");
        Ok(())
    }
}

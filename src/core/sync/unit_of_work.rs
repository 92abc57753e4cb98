//! Staged writes for one synchronization run
//!
//! The unit of work is an identity map in front of a [`SlotStore`]. Lookups
//! see what was already staged in this run before falling back to the store,
//! and nothing reaches the store until [`UnitOfWork::commit`].

use crate::adapters::store::SlotStore;
use crate::domain::ids::DoctorId;
use crate::domain::{Doctor, Slot, StoreError};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// Pending doctor writes for a single run
pub struct UnitOfWork {
    store: Arc<dyn SlotStore + Send + Sync>,
    staged: Vec<Doctor>,
    positions: HashMap<DoctorId, usize>,
}

impl UnitOfWork {
    pub fn new(store: Arc<dyn SlotStore + Send + Sync>) -> Self {
        Self {
            store,
            staged: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Find a doctor, preferring the copy staged in this run
    pub async fn find_doctor(&self, id: &DoctorId) -> Result<Option<Doctor>, StoreError> {
        if let Some(&position) = self.positions.get(id) {
            return Ok(Some(self.staged[position].clone()));
        }
        self.store.find_doctor(id).await
    }

    /// Find a slot by `(doctor, start)`, preferring the doctor's own collection
    pub async fn find_slot(
        &self,
        doctor: &Doctor,
        start: DateTime<Utc>,
    ) -> Result<Option<Slot>, StoreError> {
        if let Some(slot) = doctor.slot_starting_at(start) {
            return Ok(Some(slot.clone()));
        }
        self.store.find_slot(doctor.id(), start).await
    }

    /// Stage a doctor for writing, replacing any earlier staged copy
    pub fn save(&mut self, doctor: Doctor) {
        match self.positions.get(doctor.id()) {
            Some(&position) => self.staged[position] = doctor,
            None => {
                self.positions.insert(doctor.id().clone(), self.staged.len());
                self.staged.push(doctor);
            }
        }
    }

    /// Doctors staged so far, in the order they were first saved
    pub fn pending(&self) -> &[Doctor] {
        &self.staged
    }

    /// Write every staged doctor in one store commit
    ///
    /// Returns the number of doctors written.
    pub async fn commit(self) -> Result<usize, StoreError> {
        let count = self.staged.len();
        self.store.commit_all(&self.staged).await?;
        Ok(count)
    }

    /// Drop every staged write; returns how many doctors were pending
    pub fn discard(self) -> usize {
        self.staged.len()
    }
}

//! Doctor aggregate
//!
//! A doctor exclusively owns its slots. The collection lives here and each
//! slot only points back through its [`DoctorId`], so there is no reference
//! cycle to manage.

use super::ids::DoctorId;
use super::slot::Slot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A doctor and the slots it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    id: DoctorId,
    name: String,
    has_error: bool,
    slots: Vec<Slot>,
}

impl Doctor {
    /// Creates a doctor with no slots and a cleared error flag
    pub fn new(id: DoctorId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            has_error: false,
            slots: Vec::new(),
        }
    }

    /// Rebuilds a doctor that was previously persisted
    pub fn restore(id: DoctorId, name: String, has_error: bool, slots: Vec<Slot>) -> Self {
        Self {
            id,
            name,
            has_error,
            slots,
        }
    }

    pub fn id(&self) -> &DoctorId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }

    /// Records that the last slot fetch for this doctor failed
    pub fn mark_error(&mut self) {
        self.has_error = true;
    }

    pub fn clear_error(&mut self) {
        self.has_error = false;
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Finds the owned slot with the given start instant
    pub fn slot_starting_at(&self, start: DateTime<Utc>) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.start() == start)
    }

    /// Attaches a slot to this doctor
    ///
    /// Attaching a slot that is already in the collection (same id) keeps a
    /// single entry, refreshed with the given copy. Returns `true` only when
    /// the slot was not attached before.
    pub fn attach_slot(&mut self, slot: Slot) -> bool {
        debug_assert_eq!(slot.doctor_id(), &self.id);

        match self.slots.iter_mut().find(|owned| owned.id() == slot.id()) {
            Some(owned) => {
                *owned = slot;
                false
            }
            None => {
                self.slots.push(slot);
                true
            }
        }
    }
}

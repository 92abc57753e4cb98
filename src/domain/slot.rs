//! Appointment slot entity

use super::ids::{DoctorId, SlotId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How many minutes old a slot must be before a synchronization run may
/// overwrite its end.
///
/// Slots younger than this are left alone so that back-to-back runs do not
/// churn the same rows.
pub const SLOT_STALENESS_MINUTES: i64 = 5;

/// An appointment slot owned by a doctor
///
/// `(doctor_id, start)` is the logical identity of a slot; `id` is only the
/// storage key. `doctor_id` is a lookup reference to the owner and never keeps
/// the doctor alive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    id: SlotId,
    doctor_id: DoctorId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl Slot {
    /// Creates a brand new slot, stamping its creation time with the current clock
    pub fn new(doctor_id: DoctorId, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: SlotId::generate(),
            doctor_id,
            start,
            end,
            created_at: Utc::now(),
        }
    }

    /// Rebuilds a slot that was previously persisted
    pub fn restore(
        id: SlotId,
        doctor_id: DoctorId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            doctor_id,
            start,
            end,
            created_at,
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn doctor_id(&self) -> &DoctorId {
        &self.doctor_id
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Overwrites the end time. The creation time is never touched.
    pub fn set_end(&mut self, end: DateTime<Utc>) {
        self.end = end;
    }

    /// Whether the slot was created more than [`SLOT_STALENESS_MINUTES`] before `now`
    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        self.created_at < now - Duration::minutes(SLOT_STALENESS_MINUTES)
    }

    /// Whether the slot is stale against the current wall clock
    pub fn is_stale(&self) -> bool {
        self.is_stale_at(Utc::now())
    }
}

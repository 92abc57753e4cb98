//! Doctor and slot reconciliation
//!
//! Merges the remote snapshot into stored state. Doctors and their slots are
//! processed strictly one after another; every write is staged in a
//! [`UnitOfWork`] and committed once at the end of the run.

use super::summary::SyncSummary;
use super::unit_of_work::UnitOfWork;
use crate::adapters::doctors::{DoctorRecord, DoctorsSource, SlotRecord};
use crate::adapters::store::SlotStore;
use crate::core::naming::normalize_name;
use crate::domain::ids::DoctorId;
use crate::domain::{Doctor, MalformedRecord, Result, Slot};
use crate::log_skipped_record;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;

/// Synchronizes doctors and their slots from a source into a store
pub struct DoctorSlotsSynchronizer {
    source: Arc<dyn DoctorsSource + Send + Sync>,
    store: Arc<dyn SlotStore + Send + Sync>,
    dry_run: bool,
}

impl DoctorSlotsSynchronizer {
    /// Create a new synchronizer
    pub fn new(
        source: Arc<dyn DoctorsSource + Send + Sync>,
        store: Arc<dyn SlotStore + Send + Sync>,
    ) -> Self {
        Self {
            source,
            store,
            dry_run: false,
        }
    }

    /// Run without committing anything
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run one full synchronization pass
    ///
    /// A failing slot fetch only flags that doctor. A failing doctor list or a
    /// failing commit ends the run with an error and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Fetch` if the doctor list cannot be fetched and
    /// `SyncError::Store` if the store cannot be read or committed.
    pub async fn synchronize(&self) -> Result<SyncSummary> {
        let start_time = Instant::now();
        let mut summary = SyncSummary::new(self.dry_run);

        tracing::info!(
            source = %self.source.base_url(),
            store = self.store.backend_name(),
            dry_run = self.dry_run,
            "Starting doctor slot synchronization"
        );

        let doctors = self.source.fetch_doctors().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch doctor list");
            e
        })?;

        let mut uow = UnitOfWork::new(self.store.clone());

        for record in doctors {
            let record = record.map_err(|e| {
                tracing::error!(error = %e, "Doctor list interrupted");
                e
            })?;

            summary.doctors_seen += 1;
            self.sync_doctor(&mut uow, record, &mut summary).await?;
        }

        if self.dry_run {
            let pending = uow.discard();
            tracing::info!(
                doctors = pending,
                "DRY RUN: Would commit {} doctors",
                pending
            );
        } else {
            let written = uow.commit().await.map_err(|e| {
                tracing::error!(error = %e, "Failed to commit synchronized doctors");
                e
            })?;
            tracing::debug!(doctors = written, "Committed synchronized doctors");
        }

        Ok(summary.with_duration(start_time.elapsed()))
    }

    async fn sync_doctor(
        &self,
        uow: &mut UnitOfWork,
        record: DoctorRecord,
        summary: &mut SyncSummary,
    ) -> Result<()> {
        let name = match normalize_name(&record.name) {
            Ok(name) => name,
            Err(e) => {
                let raw = json!({ "id": record.id, "name": record.name });
                log_skipped_record!(MalformedRecord::new(e.to_string(), raw), record.id);
                summary.doctors_skipped += 1;
                return Ok(());
            }
        };

        let id = DoctorId::from_remote(record.id);
        let mut doctor = match uow.find_doctor(&id).await? {
            Some(doctor) => doctor,
            None => {
                summary.doctors_created += 1;
                Doctor::new(id, name.clone())
            }
        };

        doctor.set_name(name);
        doctor.clear_error();

        match self.source.fetch_doctor_slots(record.id).await {
            Ok(slots) => {
                for slot in slots {
                    match slot {
                        Ok(slot) => self.apply_slot(uow, &mut doctor, slot, summary).await?,
                        Err(e) => {
                            // Slots applied before the break are kept
                            tracing::error!(
                                doctor_id = record.id,
                                error = %e,
                                "Slot list interrupted"
                            );
                            doctor.mark_error();
                            summary.doctors_flagged += 1;
                            break;
                        }
                    }
                }
            }
            Err(e) => {
                tracing::error!(
                    doctor_id = record.id,
                    error = %e,
                    "Error fetching slots for doctor"
                );
                doctor.mark_error();
                summary.doctors_flagged += 1;
            }
        }

        tracing::debug!(
            doctor_id = %doctor.id(),
            slots = doctor.slots().len(),
            has_error = doctor.has_error(),
            "Doctor staged"
        );
        uow.save(doctor);
        Ok(())
    }

    async fn apply_slot(
        &self,
        uow: &UnitOfWork,
        doctor: &mut Doctor,
        record: SlotRecord,
        summary: &mut SyncSummary,
    ) -> Result<()> {
        let slot = match uow.find_slot(doctor, record.start).await? {
            Some(mut slot) => {
                if slot.is_stale() {
                    slot.set_end(record.end);
                    summary.slots_refreshed += 1;
                } else {
                    summary.slots_unchanged += 1;
                }
                slot
            }
            None => {
                summary.slots_created += 1;
                Slot::new(doctor.id().clone(), record.start, record.end)
            }
        };

        doctor.attach_slot(slot);
        Ok(())
    }
}

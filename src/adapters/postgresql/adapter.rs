//! PostgreSQL adapter implementing the store trait

use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::postgresql::models::{DoctorRow, SlotRow};
use crate::adapters::store::SlotStore;
use crate::domain::ids::DoctorId;
use crate::domain::{Doctor, Slot, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

const UPSERT_DOCTOR: &str = r#"
    INSERT INTO doctors (id, name, error)
    VALUES ($1, $2, $3)
    ON CONFLICT (id) DO UPDATE SET
        name = EXCLUDED.name,
        error = EXCLUDED.error
"#;

// created_at is written on insert only
const UPSERT_SLOT: &str = r#"
    INSERT INTO slots (id, doctor_id, start_at, end_at, created_at)
    VALUES ($1, $2, $3, $4, $5)
    ON CONFLICT (id) DO UPDATE SET
        start_at = EXCLUDED.start_at,
        end_at = EXCLUDED.end_at
"#;

const SELECT_SLOT_COLUMNS: &str = "SELECT id, doctor_id, start_at, end_at, created_at FROM slots";

/// PostgreSQL implementation of [`SlotStore`]
pub struct PostgreSQLAdapter {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLAdapter {
    /// Create a new PostgreSQL adapter
    pub fn new(client: PostgreSQLClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    async fn slots_for(&self, doctor_id: &str) -> Result<Vec<Slot>, StoreError> {
        let client = self.client.get_connection().await?;
        let query = format!("{SELECT_SLOT_COLUMNS} WHERE doctor_id = $1 ORDER BY start_at");

        let rows = client
            .query(query.as_str(), &[&doctor_id])
            .await
            .map_err(|e| StoreError::QueryFailed(format!("Failed to load slots: {e}")))?;

        rows.iter()
            .map(|row| SlotRow::from_row(row).and_then(SlotRow::into_domain))
            .collect()
    }
}

#[async_trait]
impl SlotStore for PostgreSQLAdapter {
    fn backend_name(&self) -> &'static str {
        "postgresql"
    }

    async fn test_connection(&self) -> Result<(), StoreError> {
        self.client.test_connection().await
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.client.ensure_schema().await
    }

    async fn find_doctor(&self, id: &DoctorId) -> Result<Option<Doctor>, StoreError> {
        let row = {
            let client = self.client.get_connection().await?;
            client
                .query_opt(
                    "SELECT id, name, error FROM doctors WHERE id = $1",
                    &[&id.as_str()],
                )
                .await
                .map_err(|e| StoreError::QueryFailed(format!("Failed to load doctor: {e}")))?
        };

        match row {
            Some(row) => {
                let doctor = DoctorRow::from_row(&row)?;
                let slots = self.slots_for(id.as_str()).await?;
                Ok(Some(doctor.into_domain(slots)?))
            }
            None => Ok(None),
        }
    }

    async fn find_slot(
        &self,
        doctor_id: &DoctorId,
        start: DateTime<Utc>,
    ) -> Result<Option<Slot>, StoreError> {
        let client = self.client.get_connection().await?;
        let query = format!("{SELECT_SLOT_COLUMNS} WHERE doctor_id = $1 AND start_at = $2");

        let row = client
            .query_opt(query.as_str(), &[&doctor_id.as_str(), &start])
            .await
            .map_err(|e| StoreError::QueryFailed(format!("Failed to load slot: {e}")))?;

        row.map(|row| SlotRow::from_row(&row).and_then(SlotRow::into_domain))
            .transpose()
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>, StoreError> {
        let client = self.client.get_connection().await?;

        let doctor_rows = client
            .query("SELECT id, name, error FROM doctors ORDER BY id", &[])
            .await
            .map_err(|e| StoreError::QueryFailed(format!("Failed to list doctors: {e}")))?;

        let slot_query = format!("{SELECT_SLOT_COLUMNS} ORDER BY doctor_id, start_at");
        let slot_rows = client
            .query(slot_query.as_str(), &[])
            .await
            .map_err(|e| StoreError::QueryFailed(format!("Failed to list slots: {e}")))?;

        let mut slots_by_doctor: BTreeMap<String, Vec<Slot>> = BTreeMap::new();
        for row in &slot_rows {
            let slot = SlotRow::from_row(row)?;
            slots_by_doctor
                .entry(slot.doctor_id.clone())
                .or_default()
                .push(slot.into_domain()?);
        }

        doctor_rows
            .iter()
            .map(|row| {
                let doctor = DoctorRow::from_row(row)?;
                let slots = slots_by_doctor.remove(&doctor.id).unwrap_or_default();
                doctor.into_domain(slots)
            })
            .collect()
    }

    async fn commit_all(&self, doctors: &[Doctor]) -> Result<(), StoreError> {
        let mut client = self.client.get_connection().await?;

        let tx = client
            .transaction()
            .await
            .map_err(|e| StoreError::CommitFailed(format!("Failed to begin transaction: {e}")))?;

        let mut slot_count = 0usize;
        for doctor in doctors {
            let row = DoctorRow::from_domain(doctor);
            tx.execute(UPSERT_DOCTOR, &[&row.id, &row.name, &row.error])
                .await
                .map_err(|e| {
                    tracing::error!(doctor_id = %row.id, error = %e, "Failed to write doctor");
                    StoreError::CommitFailed(format!("Failed to write doctor {}: {e}", row.id))
                })?;

            for slot in doctor.slots() {
                let row = SlotRow::from_domain(slot);
                tx.execute(
                    UPSERT_SLOT,
                    &[
                        &row.id,
                        &row.doctor_id,
                        &row.start_at,
                        &row.end_at,
                        &row.created_at,
                    ],
                )
                .await
                .map_err(|e| {
                    tracing::error!(
                        doctor_id = %row.doctor_id,
                        slot_id = %row.id,
                        error = %e,
                        "Failed to write slot"
                    );
                    StoreError::CommitFailed(format!("Failed to write slot {}: {e}", row.id))
                })?;
                slot_count += 1;
            }
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::CommitFailed(format!("Failed to commit transaction: {e}")))?;

        tracing::info!(
            doctors = doctors.len(),
            slots = slot_count,
            "PostgreSQL commit complete"
        );
        Ok(())
    }
}

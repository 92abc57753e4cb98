//! PostgreSQL row models
//!
//! Maps rows of the `doctors` and `slots` tables to and from the domain.

use crate::domain::ids::{DoctorId, SlotId};
use crate::domain::{Doctor, Slot, StoreError};
use chrono::{DateTime, Utc};
use tokio_postgres::Row;
use uuid::Uuid;

/// A row of the `doctors` table
#[derive(Debug, Clone)]
pub struct DoctorRow {
    pub id: String,
    pub name: String,
    pub error: bool,
}

impl DoctorRow {
    pub fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            id: column(row, "id")?,
            name: column(row, "name")?,
            error: column(row, "error")?,
        })
    }

    pub fn from_domain(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id().to_string(),
            name: doctor.name().to_string(),
            error: doctor.has_error(),
        }
    }

    /// Builds the domain doctor with the given slots attached
    pub fn into_domain(self, slots: Vec<Slot>) -> Result<Doctor, StoreError> {
        let id = DoctorId::new(self.id).map_err(StoreError::InvalidRow)?;
        Ok(Doctor::restore(id, self.name, self.error, slots))
    }
}

/// A row of the `slots` table
#[derive(Debug, Clone)]
pub struct SlotRow {
    pub id: Uuid,
    pub doctor_id: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl SlotRow {
    pub fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            id: column(row, "id")?,
            doctor_id: column(row, "doctor_id")?,
            start_at: column(row, "start_at")?,
            end_at: column(row, "end_at")?,
            created_at: column(row, "created_at")?,
        })
    }

    pub fn from_domain(slot: &Slot) -> Self {
        Self {
            id: slot.id().as_uuid(),
            doctor_id: slot.doctor_id().to_string(),
            start_at: slot.start(),
            end_at: slot.end(),
            created_at: slot.created_at(),
        }
    }

    pub fn into_domain(self) -> Result<Slot, StoreError> {
        let doctor_id = DoctorId::new(self.doctor_id).map_err(StoreError::InvalidRow)?;
        Ok(Slot::restore(
            SlotId::from(self.id),
            doctor_id,
            self.start_at,
            self.end_at,
            self.created_at,
        ))
    }
}

fn column<'a, T>(row: &'a Row, name: &str) -> Result<T, StoreError>
where
    T: tokio_postgres::types::FromSql<'a>,
{
    row.try_get(name)
        .map_err(|e| StoreError::InvalidRow(format!("Column '{name}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_slot_row_roundtrip_keeps_created_at() {
        let created_at = Utc.with_ymd_and_hms(2023, 6, 30, 9, 0, 0).unwrap();
        let slot = Slot::restore(
            SlotId::generate(),
            DoctorId::from_remote(3),
            Utc.with_ymd_and_hms(2023, 7, 1, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2023, 7, 1, 11, 0, 0).unwrap(),
            created_at,
        );

        let row = SlotRow::from_domain(&slot);
        assert_eq!(row.doctor_id, "3");
        assert_eq!(row.into_domain().unwrap(), slot);
    }

    #[test]
    fn test_doctor_row_rejects_blank_id() {
        let row = DoctorRow {
            id: "  ".to_string(),
            name: "John Doe".to_string(),
            error: false,
        };
        assert!(matches!(
            row.into_domain(Vec::new()),
            Err(StoreError::InvalidRow(_))
        ));
    }

    #[test]
    fn test_doctor_row_from_domain() {
        let mut doctor = Doctor::new(DoctorId::from_remote(1), "John Doe");
        doctor.mark_error();

        let row = DoctorRow::from_domain(&doctor);
        assert_eq!(row.id, "1");
        assert!(row.error);
    }
}

//! Doctors source trait definition
//!
//! The synchronizer only ever talks to the remote side through
//! [`DoctorsSource`], so tests and alternative backends can stand in for the
//! HTTP client.

use super::records::{DoctorRecord, SlotRecord};
use super::stream::RecordStream;
use crate::domain::FetchError;
use async_trait::async_trait;

/// Trait for remote doctor and slot providers
///
/// Both calls return a single-pass stream. A whole-call failure (transport
/// error, non-array body) is returned as `Err` before any record is produced.
/// Malformed elements are logged and skipped inside the stream.
///
/// # Example
///
/// ```no_run
/// use slotsync::adapters::doctors::{DoctorsSource, HttpDoctorsSource};
/// use slotsync::config::DoctorsApiConfig;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let source = HttpDoctorsSource::new(&DoctorsApiConfig::default())?;
///
/// for doctor in source.fetch_doctors().await? {
///     let doctor = doctor?;
///     println!("{}: {}", doctor.id, doctor.name);
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait DoctorsSource: Send + Sync {
    /// Fetch every doctor the API lists
    async fn fetch_doctors(&self) -> Result<RecordStream<DoctorRecord>, FetchError>;

    /// Fetch every slot the API lists for one doctor
    async fn fetch_doctor_slots(
        &self,
        doctor_id: i64,
    ) -> Result<RecordStream<SlotRecord>, FetchError>;

    /// Location of the API, for diagnostics
    fn base_url(&self) -> &str;
}

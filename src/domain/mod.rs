//! Domain models and types for slotsync.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`DoctorId`], [`SlotId`])
//! - **Entities** ([`Doctor`], which owns its [`Slot`]s)
//! - **Error types** ([`SyncError`], [`FetchError`], [`StoreError`])
//! - **Result type alias** ([`Result`])
//!
//! # Ownership
//!
//! A doctor holds its slots in an owning collection; a slot refers back to
//! its doctor by id only:
//!
//! ```rust
//! use slotsync::domain::{Doctor, DoctorId, Slot};
//! use chrono::{TimeZone, Utc};
//!
//! let id = DoctorId::from_remote(1);
//! let mut doctor = Doctor::new(id.clone(), "John Doe");
//! let start = Utc.with_ymd_and_hms(2023, 7, 1, 10, 0, 0).unwrap();
//! let end = Utc.with_ymd_and_hms(2023, 7, 1, 11, 0, 0).unwrap();
//!
//! doctor.attach_slot(Slot::new(id, start, end));
//! assert_eq!(doctor.slots().len(), 1);
//! ```

pub mod doctor;
pub mod errors;
pub mod ids;
pub mod result;
pub mod slot;

// Re-export commonly used types for convenience
pub use doctor::Doctor;
pub use errors::{FetchError, MalformedRecord, NameError, StoreError, SyncError};
pub use ids::{DoctorId, SlotId};
pub use result::Result;
pub use slot::{Slot, SLOT_STALENESS_MINUTES};

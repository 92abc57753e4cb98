//! Synchronization of doctors and their slots
//!
//! - [`DoctorSlotsSynchronizer`] - runs one reconciliation pass
//! - [`UnitOfWork`] - staged writes committed once per run
//! - [`SyncSummary`] - counters reported at the end of a run

pub mod summary;
pub mod synchronizer;
pub mod unit_of_work;

pub use summary::SyncSummary;
pub use synchronizer::DoctorSlotsSynchronizer;
pub use unit_of_work::UnitOfWork;

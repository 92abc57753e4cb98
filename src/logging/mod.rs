//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - JSON-formatted file logs with rotation
//! - Configurable log levels
//! - Muting all output on configured weekdays
//!
//! Every record the synchronizer skips is logged through
//! [`log_skipped_record!`](crate::log_skipped_record) so that the raw record,
//! the reason, and the doctor id (when there is one) always land in the same
//! entry.
//!
//! # Example
//!
//! ```no_run
//! use slotsync::logging::init_logging;
//! use slotsync::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a record that was skipped inside an otherwise valid payload
///
/// # Example
///
/// ```no_run
/// use slotsync::log_skipped_record;
/// use slotsync::domain::MalformedRecord;
///
/// let record = MalformedRecord::new("Missing expected fields", serde_json::json!({"id": 1}));
/// log_skipped_record!(&record);
/// log_skipped_record!(&record, 7);
/// ```
#[macro_export]
macro_rules! log_skipped_record {
    ($record:expr) => {{
        let skipped = &$record;
        tracing::error!(
            record = %skipped.raw,
            error = %skipped.reason,
            "Skipping malformed record"
        );
    }};
    ($record:expr, $doctor_id:expr) => {{
        let skipped = &$record;
        tracing::error!(
            record = %skipped.raw,
            error = %skipped.reason,
            doctor_id = %$doctor_id,
            "Skipping malformed record"
        );
    }};
}

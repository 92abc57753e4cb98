//! Domain error types
//!
//! This module defines the error hierarchy for slotsync. Errors that cross a
//! module boundary never expose third-party types; adapters convert HTTP and
//! database failures into [`FetchError`] and [`StoreError`] before returning.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Main slotsync error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failures talking to the remote doctors API
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Failures reading from or committing to the store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Remote data source errors
///
/// Transport failures and top-level payload decode failures are both surfaced
/// through this one type so callers only have a single kind to catch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response
    #[error("Failed to connect to doctors API: {0}")]
    ConnectionFailed(String),

    /// The API answered with a non-success status
    #[error("Request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    /// The response body is not a structured array payload
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// The record sequence broke off part way through
    #[error("Record stream interrupted: {0}")]
    Interrupted(String),
}

/// Persistence errors
///
/// Always fatal for a synchronization run.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No connection could be obtained
    #[error("Failed to connect to store: {0}")]
    ConnectionFailed(String),

    /// A read or schema statement failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// The final commit failed and was rolled back
    #[error("Commit failed: {0}")]
    CommitFailed(String),

    /// A stored row could not be mapped back into the domain
    #[error("Invalid row: {0}")]
    InvalidRow(String),
}

/// Name normalization precondition failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// The name has no space, so there is no surname to inspect
    #[error("Name '{0}' has no surname")]
    MissingSurname(String),
}

/// A single record that was skipped inside an otherwise valid payload
///
/// This is never propagated as an error. It exists so that the skip reason and
/// the raw record travel together into the log entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedRecord {
    /// Why the record was rejected
    pub reason: String,

    /// The record exactly as it was received
    pub raw: Value,
}

impl MalformedRecord {
    /// Creates a new malformed record warning
    pub fn new(reason: impl Into<String>, raw: Value) -> Self {
        Self {
            reason: reason.into(),
            raw,
        }
    }
}

impl fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reason, self.raw)
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::Configuration(format!("TOML parse error: {err}"))
    }
}

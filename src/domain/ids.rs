//! Domain identifier types with validation
//!
//! Newtype wrappers keep doctor keys and slot keys from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Doctor identifier newtype wrapper
///
/// The value comes from the remote API and is treated as opaque. It is stored
/// as a string even though the API hands out integers.
///
/// # Examples
///
/// ```
/// use slotsync::domain::ids::DoctorId;
///
/// let id = DoctorId::from_remote(42);
/// assert_eq!(id.as_str(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DoctorId(String);

impl DoctorId {
    /// Creates a new DoctorId from a string
    ///
    /// Returns `Err` if the identifier is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Doctor ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Builds the key for a doctor id as the remote API reports it
    pub fn from_remote(id: i64) -> Self {
        Self(id.to_string())
    }

    /// Returns the doctor ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DoctorId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for DoctorId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Slot identifier, generated locally and never derived from remote data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId(Uuid);

impl SlotId {
    /// Generates a fresh random slot identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for SlotId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SlotId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid slot ID '{s}': {e}"))
    }
}

//! Result type alias for slotsync

use super::errors::SyncError;

/// Result type alias for slotsync operations
///
/// # Examples
///
/// ```
/// use slotsync::domain::result::Result;
/// use slotsync::domain::errors::SyncError;
///
/// fn failing_function() -> Result<()> {
///     Err(SyncError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, SyncError>;

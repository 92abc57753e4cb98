//! Synchronization summary and reporting

use std::time::Duration;

/// Counters for one synchronization run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncSummary {
    /// Doctor records received from the API
    pub doctors_seen: usize,

    /// Doctors that did not exist in the store before this run
    pub doctors_created: usize,

    /// Doctors whose slot fetch failed and were flagged with an error
    pub doctors_flagged: usize,

    /// Doctor records skipped because their name could not be normalized
    pub doctors_skipped: usize,

    /// Slots created in this run
    pub slots_created: usize,

    /// Existing stale slots whose end time was overwritten
    pub slots_refreshed: usize,

    /// Existing fresh slots left as they were
    pub slots_unchanged: usize,

    /// Duration of the run
    pub duration: Duration,

    /// Whether the run was a dry run (nothing committed)
    pub dry_run: bool,
}

impl SyncSummary {
    /// Create a new empty summary
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Doctors staged for writing
    pub fn doctors_saved(&self) -> usize {
        self.doctors_seen - self.doctors_skipped
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            doctors_seen = self.doctors_seen,
            doctors_saved = self.doctors_saved(),
            doctors_created = self.doctors_created,
            doctors_flagged = self.doctors_flagged,
            doctors_skipped = self.doctors_skipped,
            slots_created = self.slots_created,
            slots_refreshed = self.slots_refreshed,
            slots_unchanged = self.slots_unchanged,
            duration_ms = self.duration.as_millis() as u64,
            dry_run = self.dry_run,
            "Synchronization completed"
        );

        if self.doctors_flagged > 0 {
            tracing::warn!(
                doctors_flagged = self.doctors_flagged,
                "Some doctors could not be synchronized and were flagged with an error"
            );
        }
    }
}

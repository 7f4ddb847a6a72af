//! Outcomes reported by the monitor

use cliplog_api::LogEntry;
use cliplog_store::StoreError;

use crate::Fingerprint;

/// Why a tick did not record anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnchangedReason {
    /// No probe found content
    NoContent,
    /// Content matches the last recorded fingerprint
    Duplicate,
}

/// Result of one [`ClipboardMonitor::tick`](crate::ClipboardMonitor::tick)
#[derive(Debug)]
pub enum TickOutcome {
    Unchanged(UnchangedReason),

    /// New content was recorded
    Changed {
        entry: LogEntry,
        fingerprint: Fingerprint,
        /// Console preview, when enabled in `[display]`
        preview: Option<String>,
    },

    /// New content was seen but could not be saved; it is retried next tick
    PersistFailed(StoreError),
}

impl TickOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, TickOutcome::Changed { .. })
    }
}

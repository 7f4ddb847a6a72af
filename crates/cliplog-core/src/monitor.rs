//! Clipboard monitor: the poll loop state machine

use cliplog_config::Settings;
use cliplog_host_api::ClipboardReader;
use cliplog_store::Store;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::{Fingerprint, TickOutcome, UnchangedReason, capture_snapshot, render_preview};

/// Monitor state. A tick moves Idle -> Checking and always returns to Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Checking,
}

/// Detects clipboard changes and records them.
///
/// Only the fingerprint of the most recently recorded content is kept, so
/// copying A, then B, then A again records three entries.
pub struct ClipboardMonitor {
    reader: Arc<dyn ClipboardReader>,
    store: Arc<dyn Store>,
    settings: Settings,
    last: Option<Fingerprint>,
    state: MonitorState,
}

impl ClipboardMonitor {
    /// Create a monitor, recovering the last fingerprint from today's log
    pub fn new(reader: Arc<dyn ClipboardReader>, store: Arc<dyn Store>, settings: Settings) -> Self {
        let last = recover_last_fingerprint(store.as_ref());

        info!(
            backend = reader.backend_name(),
            base_dir = %settings.base_dir().display(),
            recovered = last.is_some(),
            "Clipboard monitor initialized"
        );

        Self {
            reader,
            store,
            settings,
            last,
            state: MonitorState::Idle,
        }
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn last_fingerprint(&self) -> Option<Fingerprint> {
        self.last
    }

    /// Sleep between ticks, read fresh from the current settings
    pub fn check_interval(&self) -> Duration {
        self.settings.general.check_interval
    }

    /// Swap in new settings and store. The last fingerprint is kept so a
    /// reload does not re-record the current clipboard.
    pub fn reload(&mut self, settings: Settings, store: Arc<dyn Store>) {
        self.settings = settings;
        self.store = store;

        info!(
            base_dir = %self.settings.base_dir().display(),
            interval_secs = self.check_interval().as_secs_f64(),
            "Monitor settings reloaded"
        );
    }

    /// Run one check of the clipboard
    pub fn tick(&mut self) -> TickOutcome {
        self.state = MonitorState::Checking;
        let outcome = self.check();
        self.state = MonitorState::Idle;
        outcome
    }

    fn check(&mut self) -> TickOutcome {
        let snapshot = capture_snapshot(self.reader.as_ref(), &self.settings.content_types);

        let Some(fingerprint) = Fingerprint::of_snapshot(&snapshot) else {
            return TickOutcome::Unchanged(UnchangedReason::NoContent);
        };

        if self.last == Some(fingerprint) {
            debug!(%fingerprint, "Clipboard unchanged");
            return TickOutcome::Unchanged(UnchangedReason::Duplicate);
        }

        match self.store.record(&snapshot) {
            Ok(entry) => {
                self.last = Some(fingerprint);
                info!(kind = %entry.kind(), %fingerprint, "Clipboard entry saved");

                let preview = self
                    .settings
                    .display
                    .show_content_preview
                    .then(|| render_preview(&entry, &self.settings.display));

                TickOutcome::Changed {
                    entry,
                    fingerprint,
                    preview,
                }
            }
            Err(e) => {
                warn!(kind = %snapshot.kind(), error = %e, "Failed to save clipboard entry");
                TickOutcome::PersistFailed(e)
            }
        }
    }
}

/// Fingerprint of the newest entry in today's log, if there is one
fn recover_last_fingerprint(store: &dyn Store) -> Option<Fingerprint> {
    let entry = match store.latest_today() {
        Ok(Some(entry)) => entry,
        Ok(None) => return None,
        Err(e) => {
            warn!(error = %e, "Failed to load last entry");
            return None;
        }
    };

    let fingerprint = Fingerprint::of_entry(&entry, |path| match store.load_image(path) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            debug!(path, error = %e, "Stored image unavailable");
            None
        }
    });

    if let Some(fingerprint) = &fingerprint {
        debug!(%fingerprint, kind = %entry.kind(), "Recovered last fingerprint");
    }
    fingerprint
}

//! Store trait definitions

use cliplog_api::{ClipboardSnapshot, LogEntry};
use std::path::PathBuf;

use crate::StoreResult;

/// Main store trait
pub trait Store: Send + Sync {
    /// Project a snapshot into a log entry and append it to today's log
    fn record(&self, snapshot: &ClipboardSnapshot) -> StoreResult<LogEntry>;

    /// Newest entry of today's log, if any
    fn latest_today(&self) -> StoreResult<Option<LogEntry>>;

    /// Read back an image stored under a path relative to the base directory
    fn load_image(&self, relative_path: &str) -> StoreResult<Vec<u8>>;
}

/// Everything the store needs from the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    pub base_dir: PathBuf,
    /// Single directory name under `base_dir`
    pub images_dir: String,
    pub save_image_file: bool,
    pub save_image_base64: bool,
    pub max_entries_per_file: usize,
    pub max_log_files: usize,
    pub max_image_size: u64,
    /// Two-space indented JSON instead of compact
    pub pretty_json: bool,
}

impl StoreOptions {
    pub fn images_path(&self) -> PathBuf {
        self.base_dir.join(&self.images_dir)
    }
}

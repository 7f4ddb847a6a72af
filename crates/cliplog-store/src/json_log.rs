//! Daily JSON log files
//!
//! One file per calendar day, `clipboard_YYYY-MM-DD.json`, holding a JSON
//! array of [`LogEntry`] ordered newest first. Every save reads the whole
//! file, merges the new entry, and replaces the file through a `.temp`
//! sibling and a rename, so readers never observe a partial file.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::NaiveDate;
use cliplog_api::{ClipboardContent, ClipboardSnapshot, EntryContent, LogEntry};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::{ImageStore, Store, StoreError, StoreOptions, StoreResult};

pub const LOG_FILE_PREFIX: &str = "clipboard_";
pub const LOG_FILE_EXTENSION: &str = ".json";
pub const TEMP_FILE_SUFFIX: &str = ".temp";
pub const BACKUP_FILE_SUFFIX: &str = ".backup";

/// JSON-file based store
#[derive(Debug)]
pub struct LogStore {
    options: StoreOptions,
    images: ImageStore,
}

impl LogStore {
    /// Create a store without touching the filesystem
    pub fn new(options: StoreOptions) -> Self {
        let images = ImageStore::new(
            options.base_dir.clone(),
            options.images_dir.clone(),
            options.save_image_file,
            options.max_image_size,
        );
        Self { options, images }
    }

    /// Create a store and run [`LogStore::initialize`]
    pub fn open(options: StoreOptions) -> StoreResult<Self> {
        let store = Self::new(options);
        store.initialize()?;
        Ok(store)
    }

    /// Create the base and images directories and apply log file retention.
    ///
    /// Directory creation failures are returned; retention failures are only
    /// logged.
    pub fn initialize(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.options.base_dir)?;
        fs::create_dir_all(self.images.dir())?;
        self.cleanup_old_logs();

        debug!(base_dir = %self.options.base_dir.display(), "Store initialized");
        Ok(())
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn log_file_for(&self, date: NaiveDate) -> PathBuf {
        self.options.base_dir.join(format!(
            "{}{}{}",
            LOG_FILE_PREFIX,
            cliplog_util::format_log_date(date),
            LOG_FILE_EXTENSION
        ))
    }

    /// Path of the log file for the current local date
    pub fn today_log_file(&self) -> PathBuf {
        self.log_file_for(cliplog_util::today())
    }

    /// Append an entry to today's log file.
    ///
    /// A log that is not a JSON array is moved aside to `<file>.backup` and
    /// replaced by a log holding only the new entry. Array elements that are
    /// not entries are dropped from the rewritten log after the file is copied
    /// to a backup. On a write failure the previous file is left untouched and
    /// the error is returned.
    pub fn save(&self, entry: &LogEntry) -> StoreResult<()> {
        let path = self.today_log_file();

        let mut entries = match read_entries(&path) {
            Ok(contents) => {
                if contents.rejected > 0 {
                    warn!(
                        file = %path.display(),
                        rejected = contents.rejected,
                        "Log file has unreadable entries"
                    );
                    back_up(&path, BackupMode::Copy);
                }
                contents.entries
            }
            Err(reason) => {
                warn!(file = %path.display(), reason = %reason, "Log file is corrupt");
                back_up(&path, BackupMode::Move);
                Vec::new()
            }
        };

        // Inserted at the front and sorted stably, so on a timestamp tie the
        // new entry still comes first
        entries.insert(0, entry.clone());
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(self.options.max_entries_per_file);

        let bytes = if self.options.pretty_json {
            serde_json::to_vec_pretty(&entries)?
        } else {
            serde_json::to_vec(&entries)?
        };

        write_atomic(&path, &bytes)?;

        debug!(file = %path.display(), entries = entries.len(), "Log file written");
        Ok(())
    }

    /// Project a snapshot into the entry that would be persisted.
    ///
    /// Writes the image file as a side effect when image files are enabled.
    pub fn entry_for(&self, snapshot: &ClipboardSnapshot) -> StoreResult<LogEntry> {
        let content = match snapshot.content() {
            None => return Err(StoreError::NothingToRecord),
            Some(ClipboardContent::Text(text)) => EntryContent::Text {
                text_content: text.clone(),
            },
            Some(ClipboardContent::Files(paths)) => EntryContent::Files {
                file_paths: paths.clone(),
            },
            Some(ClipboardContent::Image(bytes)) => EntryContent::Image {
                image_path: self.images.persist(bytes, &snapshot.timestamp()),
                image_base64: self
                    .options
                    .save_image_base64
                    .then(|| BASE64.encode(bytes)),
            },
        };

        Ok(LogEntry::new(
            snapshot.timestamp(),
            content,
            snapshot.available_formats().clone(),
        ))
    }

    /// Delete the oldest daily log files beyond `max_log_files`
    fn cleanup_old_logs(&self) {
        let dir = match fs::read_dir(&self.options.base_dir) {
            Ok(dir) => dir,
            Err(e) => {
                warn!(error = %e, "Failed to list log directory");
                return;
            }
        };

        let mut logs: Vec<(String, PathBuf)> = dir
            .filter_map(Result::ok)
            .filter_map(|e| {
                let name = e.file_name().into_string().ok()?;
                is_daily_log_name(&name).then(|| (name, e.path()))
            })
            .collect();

        if logs.len() <= self.options.max_log_files {
            return;
        }

        // Date-stamped names sort chronologically
        logs.sort();
        let excess = logs.len() - self.options.max_log_files;

        for (name, path) in logs.into_iter().take(excess) {
            match fs::remove_file(&path) {
                Ok(()) => info!(file = %name, "Removed old log file"),
                Err(e) => warn!(file = %name, error = %e, "Failed to remove old log file"),
            }
        }
    }
}

impl Store for LogStore {
    fn record(&self, snapshot: &ClipboardSnapshot) -> StoreResult<LogEntry> {
        let entry = self.entry_for(snapshot)?;

        if let Err(e) = self.save(&entry) {
            // The next attempt writes its own image file
            if let EntryContent::Image {
                image_path: Some(image_path),
                ..
            } = &entry.content
            {
                let orphan = self.options.base_dir.join(image_path);
                if let Err(remove_err) = fs::remove_file(&orphan) {
                    warn!(file = %orphan.display(), error = %remove_err, "Failed to remove unlogged image");
                }
            }
            return Err(e);
        }
        Ok(entry)
    }

    fn latest_today(&self) -> StoreResult<Option<LogEntry>> {
        let path = self.today_log_file();
        match read_entries(&path) {
            Ok(contents) => Ok(contents.entries.into_iter().next()),
            Err(reason) => {
                debug!(file = %path.display(), reason = %reason, "Unreadable log file, nothing to recover");
                Ok(None)
            }
        }
    }

    fn load_image(&self, relative_path: &str) -> StoreResult<Vec<u8>> {
        let path = self.options.base_dir.join(relative_path);
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(relative_path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Exactly `clipboard_YYYY-MM-DD.json`
fn is_daily_log_name(name: &str) -> bool {
    name.strip_prefix(LOG_FILE_PREFIX)
        .and_then(|rest| rest.strip_suffix(LOG_FILE_EXTENSION))
        .and_then(|date| {
            cliplog_util::parse_log_date(date)
                .filter(|parsed| cliplog_util::format_log_date(*parsed) == date)
        })
        .is_some()
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Parsed log file
#[derive(Debug, Default)]
struct LogContents {
    entries: Vec<LogEntry>,
    /// Array elements that are not valid entries
    rejected: usize,
}

/// Read a log file. Missing and blank files are empty logs; a file that is
/// not a JSON array is reported as an error string.
fn read_entries(path: &Path) -> Result<LogContents, String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LogContents::default()),
        Err(e) => return Err(e.to_string()),
    };

    if content.trim().is_empty() {
        return Ok(LogContents::default());
    }

    let values: Vec<serde_json::Value> = serde_json::from_str(&content).map_err(|e| e.to_string())?;
    let total = values.len();
    let entries: Vec<LogEntry> = values
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();

    Ok(LogContents {
        rejected: total - entries.len(),
        entries,
    })
}

#[derive(Debug, Clone, Copy)]
enum BackupMode {
    /// Corrupt file, move it out of the way
    Move,
    /// Partly readable file about to be rewritten, keep the original too
    Copy,
}

/// Back up a log to the first free `.backup`, `.backup.1`, ... name
fn back_up(path: &Path, mode: BackupMode) {
    let backup = (0u32..)
        .map(|n| match n {
            0 => with_suffix(path, BACKUP_FILE_SUFFIX),
            n => with_suffix(path, &format!("{}.{}", BACKUP_FILE_SUFFIX, n)),
        })
        .find(|candidate| !candidate.exists());

    let Some(backup) = backup else {
        return;
    };

    let result = match mode {
        BackupMode::Move => fs::rename(path, &backup),
        BackupMode::Copy => fs::copy(path, &backup).map(|_| ()),
    };

    match result {
        Ok(()) => warn!(backup = %backup.display(), "Log file backed up"),
        Err(e) => warn!(file = %path.display(), error = %e, "Failed to back up log file"),
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    write_atomic_with(path, bytes, |from, to| fs::rename(from, to))
}

/// Stage `bytes` in `<path>.temp`, fsync, then `promote` it over `path`.
/// The temp file is removed on any failure.
fn write_atomic_with(
    path: &Path,
    bytes: &[u8],
    promote: impl FnOnce(&Path, &Path) -> io::Result<()>,
) -> io::Result<()> {
    let temp = with_suffix(path, TEMP_FILE_SUFFIX);

    let result: io::Result<()> = (|| {
        let mut file = File::create(&temp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);
        promote(&temp, path)
    })();

    if let Err(e) = &result {
        warn!(file = %path.display(), error = %e, "Failed to write log file");
        let _ = fs::remove_file(&temp);
    }
    result
}

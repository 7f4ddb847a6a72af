//! Resolved settings
//!
//! [`Settings::from_raw`] is the two-level override resolution: for every
//! `(section, key)` the user value wins when present, otherwise the built-in
//! default from [`defaults`] is used. Sections are never replaced wholesale.

use crate::schema::RawConfig;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Built-in default values, one per `(section, key)`
pub mod defaults {
    pub const CHECK_INTERVAL_SECS: f64 = 1.0;
    pub const MAX_LOG_FILES: usize = 30;
    pub const IMAGES_DIR: &str = "images";

    pub const SAVE_IMAGE_FILE: bool = true;
    pub const SAVE_IMAGE_BASE64: bool = true;
    pub const MAX_ENTRIES_PER_FILE: usize = 1000;
    pub const INDENT_JSON: bool = true;

    pub const ENABLE_TEXT: bool = true;
    pub const ENABLE_IMAGE: bool = true;
    pub const ENABLE_FILES: bool = true;
    pub const MAX_TEXT_LENGTH: usize = 1_000_000;
    pub const MAX_IMAGE_SIZE: u64 = 10 * 1024 * 1024;

    pub const SHOW_CONTENT_PREVIEW: bool = true;
    pub const MAX_PREVIEW_LENGTH: usize = 200;
    pub const SHOW_TIMESTAMPS: bool = true;
    pub const CONSOLE_WIDTH: usize = 80;

    /// Default log directory, honouring `CLIPLOG_DATA_DIR`
    pub fn base_dir() -> std::path::PathBuf {
        cliplog_util::default_data_dir()
    }
}

/// Fully resolved settings used by the store and the monitor
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub general: GeneralSettings,
    pub logging: LoggingSettings,
    pub content_types: ContentTypeSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneralSettings {
    pub check_interval: Duration,
    pub max_log_files: usize,
    pub base_dir: PathBuf,
    pub images_dir: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub save_image_file: bool,
    pub save_image_base64: bool,
    pub max_entries_per_file: usize,
    pub indent_json: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentTypeSettings {
    pub enable_text: bool,
    pub enable_image: bool,
    pub enable_files: bool,
    pub max_text_length: usize,
    pub max_image_size: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    pub show_content_preview: bool,
    pub max_preview_length: usize,
    pub show_timestamps: bool,
    pub console_width: usize,
}

impl Settings {
    /// Resolve a raw config against the built-in defaults.
    ///
    /// Expects a raw config that already passed [`crate::validate_config`].
    pub fn from_raw(raw: RawConfig) -> Self {
        let g = raw.general;
        let l = raw.logging;
        let c = raw.content_types;
        let d = raw.display;

        let interval_secs = g.check_interval.unwrap_or(defaults::CHECK_INTERVAL_SECS);

        Self {
            general: GeneralSettings {
                check_interval: Duration::try_from_secs_f64(interval_secs)
                    .unwrap_or_else(|_| Duration::from_secs_f64(defaults::CHECK_INTERVAL_SECS)),
                max_log_files: g.max_log_files.unwrap_or(defaults::MAX_LOG_FILES),
                base_dir: g.base_dir.unwrap_or_else(defaults::base_dir),
                images_dir: g.images_dir.unwrap_or_else(|| defaults::IMAGES_DIR.to_string()),
            },
            logging: LoggingSettings {
                save_image_file: l.save_image_file.unwrap_or(defaults::SAVE_IMAGE_FILE),
                save_image_base64: l.save_image_base64.unwrap_or(defaults::SAVE_IMAGE_BASE64),
                max_entries_per_file: l
                    .max_entries_per_file
                    .unwrap_or(defaults::MAX_ENTRIES_PER_FILE),
                indent_json: l.indent_json.unwrap_or(defaults::INDENT_JSON),
            },
            content_types: ContentTypeSettings {
                enable_text: c.enable_text.unwrap_or(defaults::ENABLE_TEXT),
                enable_image: c.enable_image.unwrap_or(defaults::ENABLE_IMAGE),
                enable_files: c.enable_files.unwrap_or(defaults::ENABLE_FILES),
                max_text_length: c.max_text_length.unwrap_or(defaults::MAX_TEXT_LENGTH),
                max_image_size: c.max_image_size.unwrap_or(defaults::MAX_IMAGE_SIZE),
            },
            display: DisplaySettings {
                show_content_preview: d
                    .show_content_preview
                    .unwrap_or(defaults::SHOW_CONTENT_PREVIEW),
                max_preview_length: d.max_preview_length.unwrap_or(defaults::MAX_PREVIEW_LENGTH),
                show_timestamps: d.show_timestamps.unwrap_or(defaults::SHOW_TIMESTAMPS),
                console_width: d.console_width.unwrap_or(defaults::CONSOLE_WIDTH),
            },
        }
    }

    /// Override the log directory (e.g. from `--data-dir`)
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.general.base_dir = base_dir.into();
        self
    }

    /// Absolute (or base-relative) directory where image files are written
    pub fn images_path(&self) -> PathBuf {
        self.general.base_dir.join(&self.general.images_dir)
    }

    pub fn base_dir(&self) -> &Path {
        &self.general.base_dir
    }

    /// Look up a single value by `(section, key)`.
    ///
    /// Returns `None` only for names that are not part of the schema; every
    /// known key always yields a value (user-supplied or default).
    pub fn lookup(&self, section: &str, key: &str) -> Option<SettingValue> {
        use SettingValue::*;

        let value = match (section, key) {
            ("general", "check_interval") => Float(self.general.check_interval.as_secs_f64()),
            ("general", "max_log_files") => Integer(self.general.max_log_files as u64),
            ("general", "base_dir") => Text(self.general.base_dir.display().to_string()),
            ("general", "images_dir") => Text(self.general.images_dir.clone()),

            ("logging", "save_image_file") => Bool(self.logging.save_image_file),
            ("logging", "save_image_base64") => Bool(self.logging.save_image_base64),
            ("logging", "max_entries_per_file") => Integer(self.logging.max_entries_per_file as u64),
            ("logging", "indent_json") => Bool(self.logging.indent_json),

            ("content_types", "enable_text") => Bool(self.content_types.enable_text),
            ("content_types", "enable_image") => Bool(self.content_types.enable_image),
            ("content_types", "enable_files") => Bool(self.content_types.enable_files),
            ("content_types", "max_text_length") => {
                Integer(self.content_types.max_text_length as u64)
            }
            ("content_types", "max_image_size") => Integer(self.content_types.max_image_size),

            ("display", "show_content_preview") => Bool(self.display.show_content_preview),
            ("display", "max_preview_length") => Integer(self.display.max_preview_length as u64),
            ("display", "show_timestamps") => Bool(self.display.show_timestamps),
            ("display", "console_width") => Integer(self.display.console_width as u64),

            _ => return None,
        };

        Some(value)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_raw(RawConfig::default())
    }
}

/// All `(section, key)` pairs understood by [`Settings::lookup`], in file order
pub const SETTING_KEYS: &[(&str, &str)] = &[
    ("general", "check_interval"),
    ("general", "max_log_files"),
    ("general", "base_dir"),
    ("general", "images_dir"),
    ("logging", "save_image_file"),
    ("logging", "save_image_base64"),
    ("logging", "max_entries_per_file"),
    ("logging", "indent_json"),
    ("content_types", "enable_text"),
    ("content_types", "enable_image"),
    ("content_types", "enable_files"),
    ("content_types", "max_text_length"),
    ("content_types", "max_image_size"),
    ("display", "show_content_preview"),
    ("display", "max_preview_length"),
    ("display", "show_timestamps"),
    ("display", "console_width"),
];

/// A single resolved setting value
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Integer(u64),
    Float(f64),
    Text(String),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{}", b),
            SettingValue::Integer(i) => write!(f, "{}", i),
            SettingValue::Float(x) => write!(f, "{}", x),
            SettingValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

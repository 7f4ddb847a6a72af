//! Raw configuration schema (as parsed from TOML)
//!
//! Every key is optional. Missing sections and keys are filled in from the
//! built-in defaults one key at a time when converting to [`crate::Settings`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: Option<u32>,

    #[serde(default)]
    pub general: RawGeneral,

    #[serde(default)]
    pub logging: RawLogging,

    #[serde(default)]
    pub content_types: RawContentTypes,

    #[serde(default)]
    pub display: RawDisplay,
}

/// `[general]` section
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawGeneral {
    /// Seconds between clipboard checks (fractional allowed)
    pub check_interval: Option<f64>,

    /// Number of daily log files to keep
    pub max_log_files: Option<usize>,

    /// Directory holding the daily log files
    pub base_dir: Option<PathBuf>,

    /// Image subdirectory, relative to `base_dir`
    pub images_dir: Option<String>,
}

/// `[logging]` section
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawLogging {
    pub save_image_file: Option<bool>,
    pub save_image_base64: Option<bool>,
    pub max_entries_per_file: Option<usize>,

    /// Pretty-print log files
    pub indent_json: Option<bool>,
}

/// `[content_types]` section
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawContentTypes {
    pub enable_text: Option<bool>,
    pub enable_image: Option<bool>,
    pub enable_files: Option<bool>,

    /// Maximum text length in characters
    pub max_text_length: Option<usize>,

    /// Maximum encoded image size in bytes
    pub max_image_size: Option<u64>,
}

/// `[display]` section
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDisplay {
    pub show_content_preview: Option<bool>,
    pub max_preview_length: Option<usize>,
    pub show_timestamps: Option<bool>,
    pub console_width: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_document() {
        let config: RawConfig = toml::from_str("").unwrap();
        assert!(config.config_version.is_none());
        assert!(config.general.check_interval.is_none());
        assert!(config.display.console_width.is_none());
    }

    #[test]
    fn parse_partial_sections() {
        let toml_str = r#"
            config_version = 1

            [general]
            check_interval = 0.5

            [content_types]
            enable_image = false
            max_text_length = 4096
        "#;

        let config: RawConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.check_interval, Some(0.5));
        assert!(config.general.max_log_files.is_none());
        assert_eq!(config.content_types.enable_image, Some(false));
        assert_eq!(config.content_types.max_text_length, Some(4096));
        assert!(config.logging.indent_json.is_none());
    }

    #[test]
    fn integer_interval_is_accepted() {
        let config: RawConfig = toml::from_str("[general]\ncheck_interval = 2").unwrap();
        assert_eq!(config.general.check_interval, Some(2.0));
    }
}

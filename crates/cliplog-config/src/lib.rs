//! Configuration parsing and validation for cliplog
//!
//! Supports TOML configuration with:
//! - Versioned schema
//! - Four sections (`general`, `logging`, `content_types`, `display`)
//! - Per-key fallback to built-in defaults
//! - Validation with clear error messages

mod schema;
mod settings;
mod validation;

pub use schema::*;
pub use settings::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Load and validate configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<Settings> {
    let raw: RawConfig = toml::from_str(content)?;

    // A missing version means the current one
    let version = raw.config_version.unwrap_or(CURRENT_CONFIG_VERSION);
    if version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(version));
    }

    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(Settings::from_raw(raw))
}

/// Load configuration, falling back to built-in defaults.
///
/// A missing file is normal (defaults apply); an unreadable or invalid file is
/// reported and also falls back to defaults.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Settings {
    let path = path.as_ref();

    if !path.exists() {
        info!(config_path = %path.display(), "No config file, using defaults");
        return Settings::default();
    }

    match load_config(path) {
        Ok(settings) => {
            info!(config_path = %path.display(), "Configuration loaded");
            settings
        }
        Err(e) => {
            warn!(
                config_path = %path.display(),
                error = %e,
                "Failed to load config, using defaults"
            );
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn parse_minimal_config() {
        let settings = parse_config("config_version = 1").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn parse_full_config() {
        let config = r#"
            config_version = 1

            [general]
            check_interval = 0.5
            max_log_files = 7
            base_dir = "/tmp/cliplog-test"
            images_dir = "pics"

            [logging]
            save_image_file = false
            save_image_base64 = true
            max_entries_per_file = 50
            indent_json = false

            [content_types]
            enable_files = false
            max_text_length = 100
            max_image_size = 2048

            [display]
            show_content_preview = false
            console_width = 40
        "#;

        let settings = parse_config(config).unwrap();
        assert_eq!(settings.general.check_interval, Duration::from_millis(500));
        assert_eq!(settings.general.max_log_files, 7);
        assert_eq!(settings.base_dir(), Path::new("/tmp/cliplog-test"));
        assert_eq!(settings.general.images_dir, "pics");
        assert!(!settings.logging.save_image_file);
        assert_eq!(settings.logging.max_entries_per_file, 50);
        assert!(!settings.logging.indent_json);
        assert!(!settings.content_types.enable_files);
        assert!(settings.content_types.enable_text);
        assert_eq!(settings.content_types.max_image_size, 2048);
        assert!(!settings.display.show_content_preview);
        assert_eq!(settings.display.max_preview_length, defaults::MAX_PREVIEW_LENGTH);
    }

    #[test]
    fn example_config_matches_defaults() {
        let example = include_str!("../../../config.example.toml");
        let settings = parse_config(example).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn reject_wrong_version() {
        let result = parse_config("config_version = 99");
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(99))));
    }

    #[test]
    fn reject_invalid_values() {
        let result = parse_config("[logging]\nmax_entries_per_file = 0");
        assert!(matches!(result, Err(ConfigError::ValidationFailed { errors }) if errors.len() == 1));
    }

    #[test]
    fn reject_wrong_types() {
        let result = parse_config("[general]\ncheck_interval = \"fast\"");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_config_or_default(dir.path().join("absent.toml"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[general\ncheck_interval = ").unwrap();

        assert!(load_config(&path).is_err());
        assert_eq!(load_config_or_default(&path), Settings::default());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\nmax_preview_length = 10\n").unwrap();

        let settings = load_config(&path).unwrap();
        assert_eq!(settings.display.max_preview_length, 10);
    }
}

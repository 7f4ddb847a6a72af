//! Configuration validation

use crate::schema::RawConfig;
use std::path::{Component, Path};
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("[{section}] {key}: {message}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        message: String,
    },

    #[error("[general] images_dir '{0}' must be a single relative directory name")]
    InvalidImagesDir(String),
}

impl ValidationError {
    fn invalid(section: &'static str, key: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            section,
            key,
            message: message.into(),
        }
    }
}

/// Validate a raw configuration. Only keys the user actually set are checked;
/// defaults are valid by construction.
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(interval) = config.general.check_interval
        && !(interval.is_finite() && interval > 0.0)
    {
        errors.push(ValidationError::invalid(
            "general",
            "check_interval",
            format!("must be a positive number of seconds, got {}", interval),
        ));
    }

    if config.general.max_log_files == Some(0) {
        errors.push(ValidationError::invalid(
            "general",
            "max_log_files",
            "must keep at least one log file",
        ));
    }

    if let Some(images_dir) = &config.general.images_dir
        && !is_single_component(images_dir)
    {
        errors.push(ValidationError::InvalidImagesDir(images_dir.clone()));
    }

    if config.logging.max_entries_per_file == Some(0) {
        errors.push(ValidationError::invalid(
            "logging",
            "max_entries_per_file",
            "must keep at least one entry",
        ));
    }

    if config.display.console_width == Some(0) {
        errors.push(ValidationError::invalid(
            "display",
            "console_width",
            "must be at least 1",
        ));
    }

    errors
}

fn is_single_component(dir: &str) -> bool {
    let mut components = Path::new(dir).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

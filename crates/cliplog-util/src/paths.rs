//! Default paths for cliplog components
//!
//! Provides centralized path defaults that all crates can use.
//! Paths are user-writable by default:
//! - Data: `$XDG_DATA_HOME/cliplog` or `~/.local/share/cliplog`
//! - Config: `$XDG_CONFIG_HOME/cliplog/config.toml` or `~/.config/cliplog/config.toml`

use std::path::PathBuf;

/// Environment variable for overriding the data directory
pub const CLIPLOG_DATA_DIR_ENV: &str = "CLIPLOG_DATA_DIR";

/// Environment variable for overriding the config file path
pub const CLIPLOG_CONFIG_ENV: &str = "CLIPLOG_CONFIG";

/// Config filename within the config directory
const CONFIG_FILENAME: &str = "config.toml";

/// Application subdirectory name
const APP_DIR: &str = "cliplog";

/// Get the default data directory (where daily log files live).
///
/// Order of precedence:
/// 1. `$CLIPLOG_DATA_DIR` environment variable (if set)
/// 2. `$XDG_DATA_HOME/cliplog` (if XDG_DATA_HOME is set)
/// 3. `~/.local/share/cliplog` (fallback)
pub fn default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var(CLIPLOG_DATA_DIR_ENV) {
        return PathBuf::from(path);
    }

    data_dir_without_env()
}

/// Get the data directory without checking CLIPLOG_DATA_DIR env var.
/// Used for default values in configs where the env var is checked separately.
pub fn data_dir_without_env() -> PathBuf {
    if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(data_home).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR);
    }

    // Last resort
    PathBuf::from("logs")
}

/// Get the default config file path.
///
/// Order of precedence:
/// 1. `$CLIPLOG_CONFIG` environment variable (if set)
/// 2. `$XDG_CONFIG_HOME/cliplog/config.toml` (if XDG_CONFIG_HOME is set)
/// 3. `~/.config/cliplog/config.toml` (fallback)
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CLIPLOG_CONFIG_ENV) {
        return PathBuf::from(path);
    }

    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR).join(CONFIG_FILENAME);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(CONFIG_FILENAME);
    }

    PathBuf::from(CONFIG_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_ends_with_config_toml() {
        let path = default_config_path();
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn data_dir_is_not_empty() {
        let path = data_dir_without_env();
        assert!(!path.as_os_str().is_empty());
    }
}

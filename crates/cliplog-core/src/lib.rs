//! Change detection and poll loop for cliplog
//!
//! This crate is the heart of cliplog, containing:
//! - Content fingerprints (what counts as "the same clipboard")
//! - Ordered content probes (Image -> Text -> Files)
//! - The monitor state machine (Idle -> Checking -> Idle)
//! - Console preview rendering

mod events;
mod fingerprint;
mod monitor;
mod preview;
mod probe;

pub use events::*;
pub use fingerprint::*;
pub use monitor::*;
pub use preview::*;
pub use probe::*;

use cliplog_config::Settings;
use cliplog_store::StoreOptions;

/// Store options derived from the resolved settings
pub fn store_options(settings: &Settings) -> StoreOptions {
    StoreOptions {
        base_dir: settings.base_dir().to_path_buf(),
        images_dir: settings.general.images_dir.clone(),
        save_image_file: settings.logging.save_image_file,
        save_image_base64: settings.logging.save_image_base64,
        max_entries_per_file: settings.logging.max_entries_per_file,
        max_log_files: settings.general.max_log_files,
        max_image_size: settings.content_types.max_image_size,
        pretty_json: settings.logging.indent_json,
    }
}

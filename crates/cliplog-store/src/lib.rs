//! Persistence layer for cliplog
//!
//! Provides:
//! - Daily JSON log files (newest first, bounded, atomically replaced)
//! - Standalone image files
//! - Retention of log files across days

mod images;
mod json_log;
mod traits;

pub use images::*;
pub use json_log::*;
pub use traits::*;

use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Snapshot has no content to record")]
    NothingToRecord,

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

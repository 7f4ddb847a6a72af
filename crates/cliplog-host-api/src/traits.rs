//! Clipboard reader trait

use std::collections::BTreeMap;
use thiserror::Error;

/// Errors from clipboard reads
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReaderError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

pub type ReaderResult<T> = Result<T, ReaderError>;

/// Read access to the native clipboard, one format at a time.
///
/// Every method is independently failable. Callers treat an error exactly
/// like `Ok(None)`: the format is absent for this poll.
pub trait ClipboardReader: Send + Sync {
    /// Image on the clipboard, encoded as PNG
    fn try_image(&self) -> ReaderResult<Option<Vec<u8>>>;

    /// Plain text on the clipboard
    fn try_text(&self) -> ReaderResult<Option<String>>;

    /// File paths on the clipboard, in clipboard order
    fn try_files(&self) -> ReaderResult<Option<Vec<String>>>;

    /// Native format name -> native format id, informational only
    fn list_formats(&self) -> ReaderResult<BTreeMap<String, u32>>;

    /// Short name of the backend, for logs
    fn backend_name(&self) -> &'static str {
        "unknown"
    }
}

impl<R: ClipboardReader + ?Sized> ClipboardReader for std::sync::Arc<R> {
    fn try_image(&self) -> ReaderResult<Option<Vec<u8>>> {
        (**self).try_image()
    }

    fn try_text(&self) -> ReaderResult<Option<String>> {
        (**self).try_text()
    }

    fn try_files(&self) -> ReaderResult<Option<Vec<String>>> {
        (**self).try_files()
    }

    fn list_formats(&self) -> ReaderResult<BTreeMap<String, u32>> {
        (**self).list_formats()
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}

//! Content fingerprints

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use cliplog_api::{ClipboardContent, ClipboardSnapshot, EntryContent, LogEntry};
use std::fmt;
use twox_hash::xxh3::hash128;

/// 128-bit digest of the bytes that define "the same content".
///
/// A snapshot and the entry persisted from it produce the same fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u128);

impl Fingerprint {
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(hash128(bytes))
    }

    pub fn of_text(text: &str) -> Self {
        Self::of_bytes(text.as_bytes())
    }

    /// Paths are hashed through their compact JSON array form, so order
    /// matters and no separator can be ambiguous.
    pub fn of_files(paths: &[String]) -> Self {
        Self::of_text(&serde_json::to_string(paths).unwrap_or_default())
    }

    pub fn of_content(content: &ClipboardContent) -> Self {
        match content {
            ClipboardContent::Text(text) => Self::of_text(text),
            ClipboardContent::Image(bytes) => Self::of_bytes(bytes),
            ClipboardContent::Files(paths) => Self::of_files(paths),
        }
    }

    /// `None` for a snapshot without content
    pub fn of_snapshot(snapshot: &ClipboardSnapshot) -> Option<Self> {
        snapshot.content().map(Self::of_content)
    }

    /// Fingerprint a persisted entry.
    ///
    /// Image entries are hashed from `image_base64` when present, otherwise
    /// from the bytes `load_image` returns for `image_path`.
    pub fn of_entry(entry: &LogEntry, load_image: impl FnOnce(&str) -> Option<Vec<u8>>) -> Option<Self> {
        match &entry.content {
            EntryContent::Text { text_content } => Some(Self::of_text(text_content)),
            EntryContent::Files { file_paths } => Some(Self::of_files(file_paths)),
            EntryContent::Image {
                image_path,
                image_base64,
            } => {
                if let Some(encoded) = image_base64
                    && let Ok(bytes) = BASE64.decode(encoded)
                {
                    return Some(Self::of_bytes(&bytes));
                }
                image_path
                    .as_deref()
                    .and_then(load_image)
                    .map(|bytes| Self::of_bytes(&bytes))
            }
        }
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

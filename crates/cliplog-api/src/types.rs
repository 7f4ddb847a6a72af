//! Clipboard snapshot types

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Native clipboard format name -> native format id
pub type FormatMap = BTreeMap<String, u32>;

/// Kind of content held by a snapshot or log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Unknown,
    Text,
    Image,
    Files,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Unknown => "unknown",
            ContentKind::Text => "text",
            ContentKind::Image => "image",
            ContentKind::Files => "files",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload read from the clipboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardContent {
    Text(String),
    /// Encoded image bytes (PNG)
    Image(Vec<u8>),
    /// Ordered list of file paths
    Files(Vec<String>),
}

impl ClipboardContent {
    pub fn kind(&self) -> ContentKind {
        match self {
            ClipboardContent::Text(_) => ContentKind::Text,
            ClipboardContent::Image(_) => ContentKind::Image,
            ClipboardContent::Files(_) => ContentKind::Files,
        }
    }
}

/// One observed clipboard state.
///
/// Built once per poll tick and never mutated afterwards. A snapshot without
/// content has kind [`ContentKind::Unknown`] and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardSnapshot {
    timestamp: DateTime<Local>,
    available_formats: FormatMap,
    content: Option<ClipboardContent>,
}

impl ClipboardSnapshot {
    /// Build a snapshot captured now
    pub fn new(available_formats: FormatMap, content: Option<ClipboardContent>) -> Self {
        Self::at(cliplog_util::now(), available_formats, content)
    }

    /// Build a snapshot with an explicit capture time
    pub fn at(
        timestamp: DateTime<Local>,
        available_formats: FormatMap,
        content: Option<ClipboardContent>,
    ) -> Self {
        Self {
            timestamp,
            available_formats,
            content,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(FormatMap::new(), Some(ClipboardContent::Text(text.into())))
    }

    pub fn image(bytes: Vec<u8>) -> Self {
        Self::new(FormatMap::new(), Some(ClipboardContent::Image(bytes)))
    }

    pub fn files(paths: Vec<String>) -> Self {
        Self::new(FormatMap::new(), Some(ClipboardContent::Files(paths)))
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn kind(&self) -> ContentKind {
        self.content
            .as_ref()
            .map(ClipboardContent::kind)
            .unwrap_or(ContentKind::Unknown)
    }

    pub fn content(&self) -> Option<&ClipboardContent> {
        self.content.as_ref()
    }

    pub fn available_formats(&self) -> &FormatMap {
        &self.available_formats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_is_unknown() {
        let snapshot = ClipboardSnapshot::new(FormatMap::new(), None);
        assert_eq!(snapshot.kind(), ContentKind::Unknown);
        assert!(snapshot.content().is_none());
    }

    #[test]
    fn kind_follows_content() {
        assert_eq!(ClipboardSnapshot::text("hi").kind(), ContentKind::Text);
        assert_eq!(ClipboardSnapshot::image(vec![1, 2]).kind(), ContentKind::Image);
        assert_eq!(
            ClipboardSnapshot::files(vec!["/tmp/a".into()]).kind(),
            ContentKind::Files
        );
    }

    #[test]
    fn formats_are_kept_regardless_of_kind() {
        let mut formats = FormatMap::new();
        formats.insert("CF_UNICODETEXT".into(), 13);
        let snapshot = ClipboardSnapshot::new(formats.clone(), None);
        assert_eq!(snapshot.available_formats(), &formats);
    }

    #[test]
    fn content_kind_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&ContentKind::Files).unwrap(), "\"files\"");
        assert_eq!(ContentKind::Image.to_string(), "image");
    }
}

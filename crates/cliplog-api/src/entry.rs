//! Persisted log entry format

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{ContentKind, FormatMap};

/// JSON key names used in daily log files
pub mod keys {
    pub const TIMESTAMP: &str = "timestamp";
    pub const CONTENT_TYPE: &str = "content_type";
    pub const AVAILABLE_FORMATS: &str = "available_formats";
    pub const TEXT_CONTENT: &str = "text_content";
    pub const IMAGE_PATH: &str = "image_path";
    pub const IMAGE_BASE64: &str = "image_base64";
    pub const FILE_PATHS: &str = "file_paths";
}

/// Kind-specific part of a log entry, flattened into the entry object and
/// discriminated by `content_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "content_type", rename_all = "snake_case")]
pub enum EntryContent {
    Text {
        text_content: String,
    },
    /// Either, both, or neither field may be present depending on the
    /// `save_image_file` / `save_image_base64` settings.
    Image {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_path: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_base64: Option<String>,
    },
    Files {
        file_paths: Vec<String>,
    },
}

impl EntryContent {
    pub fn kind(&self) -> ContentKind {
        match self {
            EntryContent::Text { .. } => ContentKind::Text,
            EntryContent::Image { .. } => ContentKind::Image,
            EntryContent::Files { .. } => ContentKind::Files,
        }
    }
}

/// One element of a daily log file array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Capture time of the snapshot this entry was projected from.
    /// Written with an offset; read with or without one.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Local>,

    #[serde(flatten)]
    pub content: EntryContent,

    #[serde(default)]
    pub available_formats: FormatMap,
}

impl LogEntry {
    pub fn new(timestamp: DateTime<Local>, content: EntryContent, available_formats: FormatMap) -> Self {
        Self {
            timestamp,
            content,
            available_formats,
        }
    }

    pub fn kind(&self) -> ContentKind {
        self.content.kind()
    }
}

/// ISO-8601 with an offset, or a naive local time such as
/// `2025-06-01T10:15:00.123456` as older logs contain.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", raw)))
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()?;
    // Ambiguous local times (DST fall-back) take the earlier instant
    Local.from_local_datetime(&naive).earliest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, h, m, s).unwrap()
    }

    #[test]
    fn text_entry_is_flat() {
        let mut formats = FormatMap::new();
        formats.insert("text/plain".into(), 1);
        let entry = LogEntry::new(
            at(9, 0, 0),
            EntryContent::Text {
                text_content: "hello".into(),
            },
            formats,
        );

        let value = serde_json::to_value(&entry).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj[keys::CONTENT_TYPE], "text");
        assert_eq!(obj[keys::TEXT_CONTENT], "hello");
        assert_eq!(obj[keys::AVAILABLE_FORMATS]["text/plain"], 1);
        assert!(obj[keys::TIMESTAMP].as_str().unwrap().starts_with("2025-06-01T09:00:00"));
    }

    #[test]
    fn image_entry_omits_missing_fields() {
        let entry = LogEntry::new(
            at(9, 0, 0),
            EntryContent::Image {
                image_path: Some("images/clipboard_image_20250601_090000.png".into()),
                image_base64: None,
            },
            FormatMap::new(),
        );

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value[keys::CONTENT_TYPE], "image");
        assert!(value.get(keys::IMAGE_PATH).is_some());
        assert!(value.get(keys::IMAGE_BASE64).is_none());
    }

    #[test]
    fn parse_entry_written_by_hand() {
        let json = r#"{
            "timestamp": "2025-06-01T10:15:00+00:00",
            "content_type": "files",
            "file_paths": ["/home/me/a.txt", "/home/me/b.txt"],
            "available_formats": {"CF_HDROP": 15}
        }"#;

        let entry: LogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.kind(), ContentKind::Files);
        assert_eq!(
            entry.content,
            EntryContent::Files {
                file_paths: vec!["/home/me/a.txt".into(), "/home/me/b.txt".into()]
            }
        );
        assert_eq!(entry.available_formats.get("CF_HDROP"), Some(&15));
    }

    #[test]
    fn missing_formats_default_to_empty() {
        let json = r#"{"timestamp": "2025-06-01T10:15:00Z", "content_type": "text", "text_content": "x"}"#;
        let entry: LogEntry = serde_json::from_str(json).unwrap();
        assert!(entry.available_formats.is_empty());
    }

    #[test]
    fn unknown_content_type_is_rejected() {
        let json = r#"{"timestamp": "2025-06-01T10:15:00Z", "content_type": "unknown"}"#;
        assert!(serde_json::from_str::<LogEntry>(json).is_err());
    }

    #[test]
    fn naive_timestamp_is_local_time() {
        let json = r#"{
            "timestamp": "2025-06-01T10:15:00.123456",
            "content_type": "text",
            "text_content": "earlier",
            "available_formats": {"CF_UNICODETEXT": 13}
        }"#;

        let entry: LogEntry = serde_json::from_str(json).unwrap();
        let expected = Local.with_ymd_and_hms(2025, 6, 1, 10, 15, 0).unwrap()
            + chrono::Duration::microseconds(123_456);
        assert_eq!(entry.timestamp, expected);
    }

    #[test]
    fn parse_timestamp_forms() {
        assert!(parse_timestamp("2025-06-01T10:15:00Z").is_some());
        assert!(parse_timestamp("2025-06-01T10:15:00+08:00").is_some());
        assert!(parse_timestamp("2025-06-01T10:15:00").is_some());
        assert!(parse_timestamp("2025-06-01 10:15:00.5").is_some());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2025-06-01").is_none());
    }

    #[test]
    fn bad_timestamp_is_rejected() {
        let json = r#"{"timestamp": "soon", "content_type": "text", "text_content": "x"}"#;
        assert!(serde_json::from_str::<LogEntry>(json).is_err());
    }
}

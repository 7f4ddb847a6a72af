//! Console preview of a recorded entry

use cliplog_api::{LogEntry, keys};
use cliplog_config::DisplaySettings;
use serde_json::Value;

const PREVIEW_HEADER: &str = "Clipboard content and metadata:";
const PREVIEW_FOOTER: &str = "Saved to log file";
const ELLIPSIS: &str = "...";

/// Render the preview printed after an entry is recorded.
///
/// The JSON body is the entry itself, minus `image_base64` and with
/// `text_content` cut to `max_preview_length` characters.
pub fn render_preview(entry: &LogEntry, display: &DisplaySettings) -> String {
    let rule = "-".repeat(display.console_width);

    let mut body = serde_json::to_value(entry).unwrap_or_default();
    if let Value::Object(map) = &mut body {
        map.remove(keys::IMAGE_BASE64);
        if let Some(Value::String(text)) = map.get_mut(keys::TEXT_CONTENT) {
            *text = truncate_chars(text, display.max_preview_length);
        }
    }

    let mut lines = vec![
        String::new(),
        PREVIEW_HEADER.to_string(),
        rule.clone(),
        format!("content type: {}", entry.kind()),
    ];
    if display.show_timestamps {
        lines.push(format!("time: {}", cliplog_util::format_datetime_full(&entry.timestamp)));
    }
    lines.push(serde_json::to_string_pretty(&body).unwrap_or_default());
    lines.push(rule);
    lines.push(PREVIEW_FOOTER.to_string());

    lines.join("\n")
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use cliplog_api::{EntryContent, FormatMap};
    use cliplog_config::Settings;

    fn entry(content: EntryContent) -> LogEntry {
        LogEntry::new(
            Local.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap(),
            content,
            FormatMap::new(),
        )
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel...");
        assert_eq!(truncate_chars("日本語テキスト", 2), "日本...");
    }

    #[test]
    fn test_text_preview() {
        let mut display = Settings::default().display;
        display.max_preview_length = 4;
        display.console_width = 10;

        let preview = render_preview(
            &entry(EntryContent::Text {
                text_content: "long clipboard text".into(),
            }),
            &display,
        );

        assert!(preview.contains("content type: text"));
        assert!(preview.contains("time: 2025-06-01 09:30:00"));
        assert!(preview.contains("\"long...\""));
        assert!(!preview.contains("clipboard text"));
        assert_eq!(preview.matches(&"-".repeat(10)).count(), 2);
        assert!(preview.ends_with(PREVIEW_FOOTER));
    }

    #[test]
    fn test_image_preview_hides_base64() {
        let display = Settings::default().display;
        let preview = render_preview(
            &entry(EntryContent::Image {
                image_path: Some("images/clipboard_image_20250601_093000.png".into()),
                image_base64: Some("iVBORw0KGgo=".into()),
            }),
            &display,
        );

        assert!(preview.contains("images/clipboard_image_20250601_093000.png"));
        assert!(!preview.contains("iVBORw0KGgo="));
        assert!(!preview.contains(keys::IMAGE_BASE64));
    }

    #[test]
    fn test_without_timestamps() {
        let mut display = Settings::default().display;
        display.show_timestamps = false;

        let preview = render_preview(
            &entry(EntryContent::Files {
                file_paths: vec!["/tmp/a".into()],
            }),
            &display,
        );
        assert!(!preview.contains("time: "));
        assert!(preview.contains("content type: files"));
    }
}

//! Time utilities for cliplog
//!
//! Daily log files and image files are named from the local wall clock, so
//! every component asks [`now()`] instead of calling `Local::now()` directly.
//!
//! # Mock Time for Development
//!
//! In debug builds, the `CLIPLOG_MOCK_TIME` environment variable can be set
//! to override the system time. This is useful for checking day rollover and
//! log file retention without waiting for midnight.
//!
//! Format: `YYYY-MM-DD HH:MM:SS` (e.g., `2025-12-25 14:30:00`)
//!
//! Example:
//! ```bash
//! CLIPLOG_MOCK_TIME="2025-12-31 23:59:30" cargo run --bin cliplogd
//! ```

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use std::sync::OnceLock;

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "CLIPLOG_MOCK_TIME";

/// strftime pattern for the date part of daily log file names
pub const LOG_FILE_DATE_FORMAT: &str = "%Y-%m-%d";

/// strftime pattern for the stamp part of image file names
pub const IMAGE_FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// strftime pattern accepted in [`MOCK_TIME_ENV_VAR`]
pub const MOCK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Cached mock time offset from the real time when the process started.
/// This allows mock time to advance naturally.
static MOCK_TIME_OFFSET: OnceLock<Option<chrono::Duration>> = OnceLock::new();

/// Parse a mock time value as local wall-clock time.
///
/// Returns `None` for a malformed value or a local time that does not exist
/// or is ambiguous (DST transitions).
pub fn parse_mock_time(s: &str) -> Option<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(s, MOCK_TIME_FORMAT).ok()?;
    Local.from_local_datetime(&naive).single()
}

#[allow(clippy::disallowed_methods)] // This is the internal implementation that wraps Local::now()
fn get_mock_time_offset() -> Option<chrono::Duration> {
    *MOCK_TIME_OFFSET.get_or_init(|| {
        #[cfg(debug_assertions)]
        {
            if let Ok(mock_time_str) = std::env::var(MOCK_TIME_ENV_VAR) {
                match parse_mock_time(&mock_time_str) {
                    Some(mock_dt) => {
                        let offset = mock_dt.signed_duration_since(chrono::Local::now());
                        tracing::info!(
                            mock_time = %mock_time_str,
                            offset_secs = offset.num_seconds(),
                            "Mock time enabled"
                        );
                        return Some(offset);
                    }
                    None => {
                        tracing::warn!(
                            mock_time = %mock_time_str,
                            expected_format = MOCK_TIME_FORMAT,
                            "Invalid mock time"
                        );
                    }
                }
            }
            None
        }
        #[cfg(not(debug_assertions))]
        {
            None
        }
    })
}

/// Returns whether mock time is currently active.
pub fn is_mock_time_active() -> bool {
    get_mock_time_offset().is_some()
}

/// Get the current local time, respecting mock time settings in debug builds.
#[allow(clippy::disallowed_methods)] // This is the wrapper that provides mock time support
pub fn now() -> DateTime<Local> {
    let real_now = chrono::Local::now();

    match get_mock_time_offset() {
        Some(offset) => real_now + offset,
        None => real_now,
    }
}

/// Today's date according to [`now()`].
pub fn today() -> NaiveDate {
    now().date_naive()
}

/// `2025-12-25`: the date part of a daily log file name.
pub fn format_log_date(date: NaiveDate) -> String {
    date.format(LOG_FILE_DATE_FORMAT).to_string()
}

/// Parse the date part of a daily log file name back into a date.
pub fn parse_log_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, LOG_FILE_DATE_FORMAT).ok()
}

/// `20251225_143045`: second-resolution stamp used in image file names.
pub fn format_image_stamp(dt: &DateTime<Local>) -> String {
    dt.format(IMAGE_FILE_STAMP_FORMAT).to_string()
}

/// Format a DateTime for display with full date and time.
pub fn format_datetime_full(dt: &DateTime<Local>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_format_log_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(format_log_date(date), "2025-03-07");
    }

    #[test]
    fn test_parse_log_date() {
        assert_eq!(
            parse_log_date("2025-12-25"),
            NaiveDate::from_ymd_opt(2025, 12, 25)
        );
        assert!(parse_log_date("2025-13-01").is_none());
        assert!(parse_log_date("latest").is_none());
        assert!(parse_log_date("").is_none());
    }

    #[test]
    fn test_format_image_stamp() {
        let dt = Local.with_ymd_and_hms(2025, 12, 25, 14, 30, 45).unwrap();
        assert_eq!(format_image_stamp(&dt), "20251225_143045");
    }

    #[test]
    fn test_format_datetime_full() {
        let dt = Local.with_ymd_and_hms(2025, 12, 25, 14, 30, 45).unwrap();
        assert_eq!(format_datetime_full(&dt), "2025-12-25 14:30:45");
    }

    #[test]
    fn test_now_returns_time() {
        let t = now();
        assert!(t.year() >= 2020);
        assert!(t.year() <= 2100);
    }

    #[test]
    fn test_today_matches_now() {
        // Can only differ if the test straddles midnight
        let before = now().date_naive();
        let day = today();
        let after = now().date_naive();
        assert!(day == before || day == after);
    }

    #[test]
    fn test_parse_mock_time() {
        let dt = parse_mock_time("2025-12-25 14:30:00").unwrap();
        assert_eq!(dt, Local.with_ymd_and_hms(2025, 12, 25, 14, 30, 0).unwrap());
        assert!(parse_mock_time("2025-12-25T14:30:00").is_none());
        assert!(parse_mock_time("tomorrow").is_none());
    }

    #[test]
    fn test_log_date_rolls_over_at_midnight() {
        let before = parse_mock_time("2025-12-31 23:59:59").unwrap();
        let after = before + chrono::Duration::seconds(2);

        assert_eq!(format_log_date(before.date_naive()), "2025-12-31");
        assert_eq!(format_log_date(after.date_naive()), "2026-01-01");
        assert_eq!(after.day(), 1);
        assert_eq!(format_image_stamp(&after), "20260101_000001");
    }
}

//! String formatting utilities for UI rendering.

use chrono::{DateTime, Utc};

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// Collapse newlines so text fits on one table row.
pub fn single_line(s: &str) -> String {
    s.replace('\n', " ").replace('\r', "")
}

/// One-line preview of a note body.
pub fn preview(body: &str, max_len: usize) -> String {
    truncate(single_line(body).trim(), max_len)
}

/// Format an optional timestamp; legacy rows have none.
pub fn format_datetime(dt: Option<&DateTime<Utc>>, pretty: bool) -> String {
    match dt {
        Some(dt) if pretty => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
        Some(dt) => dt.to_rfc3339(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate_short() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long() {
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
    }

    #[test]
    fn test_preview_flattens_lines() {
        assert_eq!(preview("first\r\nsecond\n", 40), "first second");
    }

    #[test]
    fn test_format_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(format_datetime(Some(&dt), true), "2024-03-04 05:06 UTC");
        assert_eq!(format_datetime(Some(&dt), false), "2024-03-04T05:06:07+00:00");
        assert_eq!(format_datetime(None, true), "-");
    }
}

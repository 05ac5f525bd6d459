// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for calendar dates, cache keys and feed timestamps.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Three-letter month abbreviations, January first.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Extension of cached feed documents.
pub const CACHE_FILE_EXTENSION: &str = "xml";

/// Abbreviation for a 1-based month number.
pub fn month_abbreviation(month: u32) -> &'static str {
    MONTH_ABBREVIATIONS[((month + 11) % 12) as usize]
}

/// Abbreviation of the month `offset` months before the 1-based `month`,
/// wrapping across the year boundary.
pub fn month_abbreviation_back(month: u32, offset: u32) -> &'static str {
    let index = (month as i64 - 1 - offset as i64).rem_euclid(12);
    MONTH_ABBREVIATIONS[index as usize]
}

/// Cache key for a day, e.g. `7Mar2026` (day is not zero-padded).
pub fn cache_key(date: NaiveDate) -> String {
    format!(
        "{}{}{}",
        date.day(),
        month_abbreviation(date.month()),
        date.year()
    )
}

/// File name holding the cached feed for a day, e.g. `7Mar2026.xml`.
pub fn cache_file_name(date: NaiveDate) -> String {
    format!("{}.{}", cache_key(date), CACHE_FILE_EXTENSION)
}

/// Drop a trailing timezone suffix (`Z`, `+hh:mm` or `-hh:mm`).
pub fn strip_timezone_suffix(timestamp: &str) -> &str {
    let timestamp = timestamp.trim();
    if let Some(stripped) = timestamp.strip_suffix('Z') {
        return stripped;
    }

    let bytes = timestamp.as_bytes();
    if bytes.len() > 6 {
        let sign = bytes[bytes.len() - 6];
        let colon = bytes[bytes.len() - 3];
        if (sign == b'+' || sign == b'-') && colon == b':' {
            return &timestamp[..timestamp.len() - 6];
        }
    }

    timestamp
}

/// Parse a feed start time such as `2011-05-13T07:42:10-07:00`.
///
/// The timezone suffix is discarded; the result is the local wall-clock time
/// the feed recorded.
pub fn parse_feed_timestamp(timestamp: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(strip_timezone_suffix(timestamp), "%Y-%m-%dT%H:%M:%S")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_cache_key_format() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(cache_key(date), "7Mar2026");
        assert_eq!(cache_file_name(date), "7Mar2026.xml");

        let date = NaiveDate::from_ymd_opt(2011, 10, 19).unwrap();
        assert_eq!(cache_file_name(date), "19Oct2011.xml");
    }

    #[test]
    fn test_month_abbreviation_back_wraps() {
        assert_eq!(month_abbreviation_back(10, 0), "Oct");
        assert_eq!(month_abbreviation_back(10, 2), "Aug");
        assert_eq!(month_abbreviation_back(1, 1), "Dec");
        assert_eq!(month_abbreviation_back(3, 11), "Apr");
    }

    #[test]
    fn test_parse_feed_timestamp_offsets() {
        let ts = parse_feed_timestamp("2011-05-13T07:42:10-07:00").unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2011, 5, 13).unwrap());
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (7, 42, 10));

        let ts = parse_feed_timestamp("2011-05-13T07:42:10+01:00").unwrap();
        assert_eq!(ts.hour(), 7);

        let ts = parse_feed_timestamp("2011-05-13T07:42:10Z").unwrap();
        assert_eq!(ts.second(), 10);
    }

    #[test]
    fn test_parse_feed_timestamp_rejects_garbage() {
        assert!(parse_feed_timestamp("").is_err());
        assert!(parse_feed_timestamp("yesterday").is_err());
    }
}

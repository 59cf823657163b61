// SPDX-License-Identifier: MIT

//! Shared helpers for date handling.
//!
//! Daily logs are keyed by `YYYY-MM-DD` date strings, so calendar math here
//! is string-prefix based rather than timestamp based.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Current UTC time as an RFC3339 string, the storage format for timestamps.
pub fn now_rfc3339() -> String {
    format_utc_rfc3339(Utc::now())
}

/// Validate a log date string.
///
/// Accepts only zero-padded `YYYY-MM-DD`; the padded form is required because
/// monthly rollups rely on lexicographic prefix matching.
pub fn validate_log_date(date: &str) -> bool {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%Y-%m-%d").to_string() == date,
        Err(_) => false,
    }
}

/// Build the `YYYY-MM` prefix for a calendar month.
///
/// `month` is zero-based (0 = January), matching the calendar widget on the
/// client. Returns `None` for months out of range.
pub fn month_prefix(year: i32, month: u32) -> Option<String> {
    if month > 11 || !(1000..=9999).contains(&year) {
        return None;
    }
    Some(format!("{:04}-{:02}", year, month + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_log_date() {
        assert!(validate_log_date("2024-03-05"));
        assert!(validate_log_date("1999-12-31"));

        assert!(!validate_log_date("2024-3-5")); // unpadded
        assert!(!validate_log_date("2024-13-01")); // bad month
        assert!(!validate_log_date("2024-02-30")); // bad day
        assert!(!validate_log_date("03-05-2024"));
        assert!(!validate_log_date(""));
    }

    #[test]
    fn test_month_prefix_zero_based() {
        // month=2 (zero-based) is March
        assert_eq!(month_prefix(2024, 2).as_deref(), Some("2024-03"));
        assert_eq!(month_prefix(2024, 0).as_deref(), Some("2024-01"));
        assert_eq!(month_prefix(2024, 11).as_deref(), Some("2024-12"));
        assert_eq!(month_prefix(2024, 12), None);
        assert_eq!(month_prefix(99, 0), None);
    }
}

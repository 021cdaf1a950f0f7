//! Date handling for post ordering.
//!
//! Post dates are free-form strings written by editors or the CMS
//! (`2024-01-15`, `2024-01-15 10:00`, `2024-01-15T10:00:00.000Z`, ...).
//! They are only interpreted when sorting; the manifest keeps them verbatim.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Naive date-time layouts accepted after RFC 3339 fails. Read as UTC.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Date-only layout.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a post date into milliseconds since the Unix epoch.
///
/// Returns `None` for empty or unrecognized strings.
pub fn parse_timestamp(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.and_utc().timestamp_millis());
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Sort key for a post date: unparsable dates count as the epoch.
#[inline]
pub fn sort_key(s: &str) -> i64 {
    parse_timestamp(s).unwrap_or(0)
}

// File: ./src/model/timestamp.rs
//! Canvas timestamps as used for ordering.
use chrono::{DateTime, NaiveDateTime, Utc};

/// `2024-01-02T10:00:00Z`: UTC, second precision, literal `Z`.
pub const CANVAS_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parses the fixed Canvas format. Fractional seconds and numeric offsets
/// are rejected.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, CANVAS_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Ordering key for an optional timestamp. Anything missing or unparsable is
/// treated as the oldest representable instant.
pub fn sort_key(raw: Option<&str>) -> DateTime<Utc> {
    raw.and_then(parse_timestamp)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

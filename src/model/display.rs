// File: ./src/model/display.rs
//! Human-readable dates for the item rows.
use crate::model::timestamp::parse_timestamp;

const DISPLAY_FORMAT: &str = "%b %d, %Y %I:%M %p";

/// Shown when an item carries no date at all.
pub const NO_DATE: &str = "N/A";

/// Renders `2024-01-02T10:00:00Z` as `Jan 02, 2024 10:00 AM`.
///
/// A string that does not parse is returned unchanged; a missing or empty
/// value becomes [`NO_DATE`].
pub fn format_date(raw: Option<&str>) -> String {
    match raw {
        None | Some("") => NO_DATE.to_string(),
        Some(s) => match parse_timestamp(s) {
            Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
            None => s.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_morning_and_evening() {
        assert_eq!(
            format_date(Some("2024-01-02T10:00:00Z")),
            "Jan 02, 2024 10:00 AM"
        );
        assert_eq!(
            format_date(Some("2023-11-30T21:05:09Z")),
            "Nov 30, 2023 09:05 PM"
        );
    }

    #[test]
    fn test_format_unparsable_is_passed_through() {
        assert_eq!(
            format_date(Some("2024-01-02T10:00:00.5Z")),
            "2024-01-02T10:00:00.5Z"
        );
    }

    #[test]
    fn test_format_missing() {
        assert_eq!(format_date(None), "N/A");
        assert_eq!(format_date(Some("")), "N/A");
    }
}

//! Date coercion for the date column.
//!
//! Values that already carry a date (or a date-time, which is truncated) are
//! accepted as-is. Text is only parsed when the caller asks for it, either
//! with an explicit `strftime` format or with the best-effort parser below.
//! Integers are parsed the same way, since delimited readers type compact
//! dates such as `20130101` as numbers.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use limn_model::{ModelError, Value};

use crate::options::DateStrings;

/// Coerces one date column cell to a calendar date.
pub fn coerce_date(value: &Value, row: usize, strings: &DateStrings) -> Result<NaiveDate, ModelError> {
    let parsed = match value {
        Value::Date(date) => Some(*date),
        Value::DateTime(datetime) => Some(datetime.date()),
        Value::Text(text) => parse_text(text, strings),
        Value::Int(number) => parse_text(&number.to_string(), strings),
        Value::Float(_) | Value::Missing => None,
    };
    parsed.ok_or_else(|| ModelError::DateParse {
        row,
        value: value.to_string(),
    })
}

fn parse_text(text: &str, strings: &DateStrings) -> Option<NaiveDate> {
    match strings {
        DateStrings::Reject => None,
        DateStrings::Format(format) => parse_date_with_format(text, format),
        DateStrings::BestEffort => parse_date(text),
    }
}

/// Parses `value` with a `strftime` format, discarding any time component.
///
/// Formats may describe a full date-time or only part of one (`%Y-%m-%d_%H`);
/// only the date fields are kept.
pub fn parse_date_with_format(value: &str, format: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDateTime::parse_from_str(trimmed, format)
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(trimmed, format))
        .ok()
}

/// Best-effort date parsing for text of unknown layout.
///
/// Tries RFC 3339, then common date-time layouts, then date-only layouts.
/// Returns `None` when nothing matches.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    try_parse_datetime(trimmed)
        .map(|dt| dt.date())
        .or_else(|| try_parse_date(trimmed))
}

/// Try to parse full datetime formats.
fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
        "%d-%b-%Y %H:%M:%S", // 15-Jan-2024 10:30:00
        "%d-%b-%Y %H:%M",
        "%m/%d/%Y %H:%M:%S", // US
        "%m/%d/%Y %H:%M",
    ];

    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Try to parse date-only formats.
fn try_parse_date(value: &str) -> Option<NaiveDate> {
    let formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y.%m.%d",
        "%d-%b-%Y",  // 15-Jan-2024
        "%d-%B-%Y",  // 15-January-2024
        "%m/%d/%Y",  // US: 01/15/2024
        "%d/%m/%Y",  // European: 15/01/2024
        "%d.%m.%Y",  // German: 15.01.2024
        "%Y%m%d",    // Compact: 20240115
        "%b %d, %Y", // Jan 15, 2024
        "%B %d, %Y", // January 15, 2024
        "%d %b %Y",  // 15 Jan 2024
        "%d %B %Y",  // 15 January 2024
    ];

    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_with_hour_truncates() {
        assert_eq!(
            parse_date_with_format("2013-01-01_00", "%Y-%m-%d_%H"),
            Some(date(2013, 1, 1))
        );
    }

    #[test]
    fn test_format_with_full_time() {
        assert_eq!(
            parse_date_with_format("2012/09/01 23:59:59", "%Y/%m/%d %H:%M:%S"),
            Some(date(2012, 9, 1))
        );
    }

    #[test]
    fn test_format_mismatch() {
        assert_eq!(parse_date_with_format("2012-09-01", "%d/%m/%Y"), None);
    }

    #[test]
    fn test_best_effort_layouts() {
        assert_eq!(parse_date("2024-01-15"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("2024/01/15"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("2024-01-15T10:30:45"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("2024-01-15T23:30:00+05:00"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("15-Jan-2024"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("01/15/2024"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("Jan 15, 2024"), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_best_effort_rejects_garbage() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_coerce_rejects_text_by_default() {
        let err = coerce_date(&Value::from("2012-09-01"), 3, &DateStrings::Reject).unwrap_err();
        assert_eq!(
            err,
            ModelError::DateParse {
                row: 3,
                value: "2012-09-01".to_string()
            }
        );
    }

    #[test]
    fn test_coerce_truncates_datetime() {
        let dt = date(2012, 9, 1).and_hms_opt(18, 0, 0).unwrap();
        assert_eq!(
            coerce_date(&Value::DateTime(dt), 0, &DateStrings::Reject),
            Ok(date(2012, 9, 1))
        );
    }

    #[test]
    fn test_coerce_parses_compact_integer_dates() {
        let compact = Value::Int(20120901);
        assert_eq!(
            coerce_date(&compact, 0, &DateStrings::Format("%Y%m%d".to_string())),
            Ok(date(2012, 9, 1))
        );
        assert_eq!(
            coerce_date(&compact, 0, &DateStrings::BestEffort),
            Ok(date(2012, 9, 1))
        );
        let err = coerce_date(&compact, 2, &DateStrings::Reject).unwrap_err();
        assert!(matches!(err, ModelError::DateParse { row: 2, .. }));
    }

    #[test]
    fn test_coerce_rejects_floats() {
        let err = coerce_date(&Value::Float(2012.5), 0, &DateStrings::BestEffort).unwrap_err();
        assert!(matches!(err, ModelError::DateParse { row: 0, .. }));
    }
}

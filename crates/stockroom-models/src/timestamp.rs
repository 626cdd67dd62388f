//! Lenient timestamp decoding.
//!
//! Timestamps are written as RFC 3339 UTC strings. Older files may hold naive
//! ISO-8601 timestamps without an offset; those are read as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer};

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub(crate) fn parse(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT)
                .ok()
                .map(|naive| naive.and_utc())
        })
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339() {
        let ts = parse("2024-03-01T10:20:30.123456789Z").unwrap();
        assert_eq!(ts.nanosecond(), 123_456_789);
    }

    #[test]
    fn test_parse_offset_converted_to_utc() {
        let ts = parse("2024-03-01T10:00:00+02:00").unwrap();
        assert_eq!(ts.hour(), 8);
    }

    #[test]
    fn test_parse_naive_as_utc() {
        let ts = parse("2024-03-01T10:20:30.500000").unwrap();
        assert_eq!(ts.day(), 1);
        assert_eq!(ts.hour(), 10);
        assert_eq!(ts.nanosecond(), 500_000_000);

        assert!(parse("2024-03-01T10:20:30").is_some());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse("yesterday").is_none());
    }
}

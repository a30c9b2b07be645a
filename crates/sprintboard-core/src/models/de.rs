//! Lenient deserializers for backend payloads
//!
//! The backend emits zone-less `LocalDateTime` strings and occasionally
//! `null` for numeric counters. Both are normalised here instead of
//! failing the whole snapshot.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a timestamp in any of the shapes the backend produces.
///
/// Accepts RFC 3339, zone-less date-times (taken as UTC) and bare dates
/// (midnight UTC). Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Optional timestamp; unparseable values become `None` with a warning
pub fn timestamp_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        let parsed = parse_timestamp(&value);
        if parsed.is_none() && !value.trim().is_empty() {
            tracing::warn!(value = %value, "Unparseable timestamp, treating as absent");
        }
        parsed
    }))
}

/// `null` becomes the type's default
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Point or task count that tolerates `null` and negative values
///
/// Negatives clamp to zero with a warning, values beyond `u32` saturate.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<i64> = Option::deserialize(deserializer)?;
    Ok(match raw {
        None => 0,
        Some(value) if value < 0 => {
            tracing::warn!(value, "Negative count, clamping to zero");
            0
        }
        Some(value) => u32::try_from(value).unwrap_or(u32::MAX),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339() {
        let ts = parse_timestamp("2025-05-05T10:30:00+02:00").unwrap();
        assert_eq!(ts.hour(), 8);
    }

    #[test]
    fn test_parse_local_date_time() {
        let ts = parse_timestamp("2025-05-05T10:30:00").unwrap();
        assert_eq!(ts.hour(), 10);
        assert_eq!(ts.minute(), 30);

        let ts = parse_timestamp("2025-05-05T10:30:00.123456").unwrap();
        assert_eq!(ts.second(), 0);
    }

    #[test]
    fn test_parse_bare_date() {
        let ts = parse_timestamp("2025-05-19").unwrap();
        assert_eq!(ts.day(), 19);
        assert_eq!(ts.hour(), 0);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_timestamp("next tuesday").is_none());
        assert!(parse_timestamp("   ").is_none());
    }

    #[derive(Deserialize)]
    struct Counter {
        #[serde(default, deserialize_with = "lenient_count")]
        value: u32,
    }

    fn count(json: &str) -> u32 {
        serde_json::from_str::<Counter>(json).unwrap().value
    }

    #[test]
    fn test_lenient_count() {
        assert_eq!(count(r#"{"value": 7}"#), 7);
        assert_eq!(count(r#"{"value": -2}"#), 0);
        assert_eq!(count(r#"{"value": null}"#), 0);
        assert_eq!(count(r#"{}"#), 0);
        assert_eq!(count(r#"{"value": 5000000000}"#), u32::MAX);
    }
}

//! Serde adapter for record timestamps.
//!
//! Accepts RFC 3339 as well as zone-less `YYYY-MM-DDTHH:MM:SS[.fff]`, which is
//! read as UTC. Always writes RFC 3339 with millisecond precision and `Z`.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn parse(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| de::Error::custom(format!("unrecognized timestamp {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_zone_less_timestamps_as_utc() {
        let parsed = parse("2025-03-12T10:30:00").unwrap();
        assert_eq!(parsed.day(), 12);
        assert_eq!(parsed.hour(), 10);
    }

    #[test]
    fn parses_offset_timestamps_into_utc() {
        let parsed = parse("2025-03-12T23:30:00-02:00").unwrap();
        assert_eq!(parsed.day(), 13);
        assert_eq!(format(&parsed), "2025-03-13T01:30:00.000Z");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("yesterday").is_none());
    }
}

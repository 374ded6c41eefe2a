//! Lenient date decoding for API payloads.
//!
//! The gym API is not consistent about temporal values: some endpoints send
//! `2025-01-31`, others `2025-01-31T07:45:00` or `2025-01-31T07:45:00.000+05:30`.
//! Read models only ever need the calendar date or the local timestamp, so
//! these helpers accept all of those shapes.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Parses a calendar date out of any of the supported shapes.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_datetime(raw).map(|dt| dt.date()))
}

/// Parses a local timestamp, dropping any offset.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok())
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok())
}

/// `#[serde(deserialize_with = "...")]` helper for optional dates.
pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

/// `#[serde(deserialize_with = "...")]` helper for optional timestamps.
pub fn optional_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_datetime))
}

/// `#[serde(deserialize_with = "...")]` helper that reads `null` as the default.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_accept_every_api_shape() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(parse_date("2025-01-31"), Some(expected));
        assert_eq!(parse_date("2025-01-31T07:45:00"), Some(expected));
        assert_eq!(parse_date("2025-01-31T07:45:00.000+05:30"), Some(expected));
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn datetimes_keep_local_time() {
        let parsed = parse_datetime("2025-01-31T07:45:00.000+05:30").unwrap();
        assert_eq!(parsed.format("%H:%M").to_string(), "07:45");
    }
}

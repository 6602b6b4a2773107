//! Lenient timestamp parsing.
//!
//! The backend renders datetimes with Python's `isoformat()`, which omits the
//! UTC offset for naive values. Both shapes are accepted here and normalised
//! to [`DateTime<Utc>`].

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, de::Error as _};

/// Parse an ISO-8601 timestamp, treating offset-less values as UTC.
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Some(dt.with_timezone(&Utc));
  }
  NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
    .ok()
    .map(|naive| naive.and_utc())
}

/// `#[serde(deserialize_with = "timestamp::required")]`
pub fn required<'de, D>(d: D) -> Result<DateTime<Utc>, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = String::deserialize(d)?;
  parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp {raw:?}")))
}

/// `#[serde(default, deserialize_with = "timestamp::optional")]`
pub fn optional<'de, D>(d: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
  D: Deserializer<'de>,
{
  match Option::<String>::deserialize(d)? {
    None => Ok(None),
    Some(raw) => parse(&raw)
      .map(Some)
      .ok_or_else(|| D::Error::custom(format!("invalid timestamp {raw:?}"))),
  }
}

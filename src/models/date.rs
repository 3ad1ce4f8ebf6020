//! Date fields coming from browser clients arrive either as `YYYY-MM-DD`
//! (date inputs) or as a full RFC 3339 timestamp (`Date.toISOString()`).
//! Only the calendar date is kept.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, de::Error};

pub fn parse(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

fn parse_field<E: Error>(raw: Option<String>) -> Result<Option<NaiveDate>, E> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse(&s)
            .map(Some)
            .ok_or_else(|| E::custom(format!("data inválida: {s}"))),
    }
}

/// `null`, `""` and a missing field all mean "no date".
pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    parse_field(Option::<String>::deserialize(deserializer)?)
}

/// For partial updates: missing field -> `None` (needs `#[serde(default)]`),
/// `null`/`""` -> `Some(None)`, a date -> `Some(Some(date))`.
pub fn deserialize_patch<'de, D>(deserializer: D) -> Result<Option<Option<NaiveDate>>, D::Error>
where
    D: Deserializer<'de>,
{
    parse_field(Option::<String>::deserialize(deserializer)?).map(Some)
}

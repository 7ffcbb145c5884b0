//! Provider timestamp format
//!
//! Data providers emit timestamps as `yyyy-MM-dd / hh:mm a`
//! (e.g. `2024-03-15 / 02:30 PM`). They are parsed once, at the boundary,
//! into [`NaiveDateTime`]; nothing past deserialization handles the string form.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::TimestampError;

/// chrono format string for `yyyy-MM-dd / hh:mm a`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d / %I:%M %p";

/// Parse a provider timestamp
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, TimestampError> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|source| {
        TimestampError::Malformed {
            value: value.to_string(),
            source,
        }
    })
}

/// Format a timestamp the way providers write it
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Serde adapter for `#[serde(with = "crate::timestamp")]` fields
pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

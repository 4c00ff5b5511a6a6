//! Calendar date text format shared by storage and presentation.
//!
//! Dates are persisted as `DD/MM/YY`. Two-digit years follow the usual
//! pivot: `00..=68` map to 20xx and `69..=99` map to 19xx, so only years in
//! `STORABLE_YEARS` read back as the same date.

use chrono::{Datelike, NaiveDate};
use std::ops::RangeInclusive;

/// `strftime` pattern for stored and displayed dates.
pub const DATE_FORMAT: &str = "%d/%m/%y";

/// Years that survive a `DD/MM/YY` write/read cycle unchanged.
pub const STORABLE_YEARS: RangeInclusive<i32> = 1969..=2068;

/// Returns whether `date` can be stored as `DD/MM/YY` without changing.
pub fn is_storable(date: NaiveDate) -> bool {
    STORABLE_YEARS.contains(&date.year())
}

/// Malformed date text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date `{value}`: expected DD/MM/YY ({source})")]
pub struct DateParseError {
    pub value: String,
    #[source]
    pub source: chrono::ParseError,
}

/// Parses `DD/MM/YY` text into a calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|source| DateParseError {
        value: value.to_string(),
        source,
    })
}

/// Formats a calendar date as `DD/MM/YY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Serde adapter storing a `NaiveDate` as `DD/MM/YY` text.
pub mod serde_ddmmyy {
    use super::{format_date, is_storable, parse_date};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_date(&text).map_err(serde::de::Error::custom)
    }
}

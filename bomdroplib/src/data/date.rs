//! Verification dates.
//!
//! Records carry the date their figures were last checked. The dataset may
//! write these in more than one format, so every comparison goes through the
//! parsed calendar date while exports echo the original text.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::BomdropError;

/// Formats accepted besides RFC 3339 timestamps, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d %B %Y", "%B %d, %Y", "%d %b %Y"];

/// A calendar date together with the text it was parsed from.
#[derive(Debug, Clone)]
pub struct VerifiedDate {
    raw: String,
    date: NaiveDate,
}

impl VerifiedDate {
    /// Parse a date string, keeping the original text.
    pub fn parse(raw: &str) -> Result<Self, BomdropError> {
        let date = parse_calendar_date(raw.trim()).ok_or_else(|| BomdropError::InvalidDate {
            value: raw.to_string(),
        })?;
        Ok(Self {
            raw: raw.to_string(),
            date,
        })
    }

    /// The date exactly as written in the dataset.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed calendar date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.date_naive());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

impl FromStr for VerifiedDate {
    type Err = BomdropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VerifiedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// Equality and ordering are calendar-based: "2025-10-01" and "1/10/2025"
// are the same day.
impl PartialEq for VerifiedDate {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
    }
}

impl Eq for VerifiedDate {}

impl PartialOrd for VerifiedDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VerifiedDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date.cmp(&other.date)
    }
}

impl Serialize for VerifiedDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for VerifiedDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

//! Calendar-day keys and date utilities
//!
//! Every component that needs to know "which day" something happened goes
//! through this module. Days are always taken in UTC: a completion logged at
//! 23:30 local time may land on the next day key, but it lands there for every
//! caller, so streak continuity is never split between two timezones.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::DomainError;

/// Format used for day keys in storage and on the wire
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// A calendar day, serialized as `YYYY-MM-DD`
///
/// Ordering follows the calendar, so a `BTreeMap<DayKey, _>` iterates oldest
/// day first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Build a key from year/month/day, `None` if the date does not exist
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The key `n` calendar days before this one
    pub fn minus_days(&self, n: u64) -> Self {
        Self(self.0 - Days::new(n))
    }

    /// The key `n` calendar days after this one
    pub fn plus_days(&self, n: u64) -> Self {
        Self(self.0 + Days::new(n))
    }

    /// Signed number of whole days from `earlier` to `self`
    pub fn days_since(&self, earlier: DayKey) -> i64 {
        self.0.signed_duration_since(earlier.0).num_days()
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // chrono accepts unpadded fields, keys must be exactly YYYY-MM-DD
        if trimmed.len() != 10 {
            return Err(DomainError::InvalidDate(format!(
                "expected YYYY-MM-DD, got '{}'",
                s
            )));
        }
        NaiveDate::parse_from_str(trimmed, DAY_KEY_FORMAT)
            .map(Self)
            .map_err(|_| DomainError::InvalidDate(format!("expected YYYY-MM-DD, got '{}'", s)))
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Canonicalize a date-time to its UTC calendar day, dropping the time of day
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> DayKey {
    DayKey(date.with_timezone(&Utc).date_naive())
}

/// The day key for the current instant
pub fn today() -> DayKey {
    format_date(&Utc::now())
}

/// The day key `n` calendar days before today
pub fn days_ago(n: u64) -> DayKey {
    today().minus_days(n)
}

/// The last `n` day keys ending at today, oldest first
pub fn last_n_days(n: usize) -> Vec<DayKey> {
    last_n_days_from(today(), n)
}

/// The `n` day keys ending at `end`, oldest first
pub fn last_n_days_from(end: DayKey, n: usize) -> Vec<DayKey> {
    (0..n as u64).rev().map(|offset| end.minus_days(offset)).collect()
}

/// Short weekday name for a day, e.g. "Mon"
pub fn day_name(day: DayKey) -> String {
    day.0.format("%a").to_string()
}

/// Day of the month, 1-31
pub fn day_number(day: DayKey) -> u32 {
    day.0.day()
}

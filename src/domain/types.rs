//! Core types and enums used throughout the domain layer
//!
//! This module defines the identifier, frequency and time-of-day types that
//! Habit and the store build on.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for a habit
///
/// A wrapper around a random UUID, serialized as a plain string. Ids are
/// generated once at creation and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(pub Uuid);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a habit ID from its string form
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How often a habit should be performed
///
/// Serialized as a tagged object: `{"type": "daily"}` or
/// `{"type": "weekly", "days": [1, 4]}`, with days counted from Sunday = 0.
/// The streak calculator only ever assumes a daily cadence; `days` is kept
/// for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Frequency {
    /// Every single day
    #[default]
    Daily,
    /// On the listed days of the week
    Weekly {
        #[serde(default, with = "sunday_indexes")]
        days: Vec<Weekday>,
    },
}

impl Frequency {
    /// Build a weekly frequency, dropping duplicate days and keeping
    /// Monday-first order
    pub fn weekly<I: IntoIterator<Item = Weekday>>(days: I) -> Self {
        let mut days: Vec<Weekday> = days.into_iter().collect();
        days.sort_by_key(|d| d.num_days_from_monday());
        days.dedup();
        Frequency::Weekly { days }
    }

    /// Tag name as used in the persisted form
    pub fn kind(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly { .. } => "weekly",
        }
    }

    /// Parse a frequency from a tool argument such as "daily" or "weekly"
    /// plus an optional list of weekday names
    pub fn parse(kind: &str, days: &[String]) -> Result<Self, DomainError> {
        match kind.trim().to_lowercase().as_str() {
            "daily" => {
                if days.is_empty() {
                    Ok(Frequency::Daily)
                } else {
                    Err(DomainError::InvalidFrequency(
                        "daily habits cannot list specific days".to_string(),
                    ))
                }
            }
            "weekly" => {
                let parsed = days
                    .iter()
                    .map(|d| {
                        d.trim().parse::<Weekday>().map_err(|_| {
                            DomainError::InvalidFrequency(format!("unknown weekday '{}'", d))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Frequency::weekly(parsed))
            }
            other => Err(DomainError::InvalidFrequency(format!(
                "'{}' is not a frequency. Valid options: daily, weekly",
                other
            ))),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly { days } if days.is_empty() => write!(f, "weekly"),
            Frequency::Weekly { days } => {
                let names: Vec<String> = days.iter().map(|d| d.to_string()).collect();
                write!(f, "weekly ({})", names.join(", "))
            }
        }
    }
}

/// Weekdays stored as Sunday-based indexes: 0 = Sunday, 1 = Monday, ...
///
/// Names such as "Mon" are still read so older records keep loading.
mod sunday_indexes {
    use chrono::Weekday;
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StoredDay {
        Index(u32),
        Name(String),
    }

    pub fn serialize<S: Serializer>(days: &[Weekday], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(days.iter().map(|d| d.num_days_from_sunday()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Weekday>, D::Error> {
        Vec::<StoredDay>::deserialize(deserializer)?
            .into_iter()
            .map(|day| match day {
                StoredDay::Index(index) => from_sunday_index(index)
                    .ok_or_else(|| de::Error::custom(format!("weekday index {} is not in 0..=6", index))),
                StoredDay::Name(name) => name
                    .parse::<Weekday>()
                    .map_err(|_| de::Error::custom(format!("unknown weekday '{}'", name))),
            })
            .collect()
    }

    fn from_sunday_index(index: u32) -> Option<Weekday> {
        match index {
            0 => Some(Weekday::Sun),
            1 => Some(Weekday::Mon),
            2 => Some(Weekday::Tue),
            3 => Some(Weekday::Wed),
            4 => Some(Weekday::Thu),
            5 => Some(Weekday::Fri),
            6 => Some(Weekday::Sat),
            _ => None,
        }
    }
}

/// Preferred time of day for a habit, opaque to the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Anytime,
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Anytime => "anytime",
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(TimeOfDay::Morning),
            "afternoon" => Ok(TimeOfDay::Afternoon),
            "evening" => Ok(TimeOfDay::Evening),
            "anytime" => Ok(TimeOfDay::Anytime),
            other => Err(DomainError::InvalidTimeOfDay(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_serializes_as_tagged_object() {
        let daily = serde_json::to_value(Frequency::Daily).unwrap();
        assert_eq!(daily, serde_json::json!({"type": "daily"}));

        let weekly = serde_json::to_value(Frequency::weekly([Weekday::Thu, Weekday::Mon])).unwrap();
        assert_eq!(weekly, serde_json::json!({"type": "weekly", "days": [1, 4]}));

        let weekend = serde_json::to_value(Frequency::weekly([Weekday::Sun, Weekday::Sat])).unwrap();
        assert_eq!(weekend["days"], serde_json::json!([6, 0]));
    }

    #[test]
    fn test_weekly_days_read_from_sunday_indexes() {
        let freq: Frequency = serde_json::from_str(r#"{"type":"weekly","days":[1,3,0]}"#).unwrap();
        assert_eq!(freq, Frequency::weekly([Weekday::Sun, Weekday::Mon, Weekday::Wed]));

        assert!(serde_json::from_str::<Frequency>(r#"{"type":"weekly","days":[7]}"#).is_err());
    }

    #[test]
    fn test_weekly_days_still_read_names() {
        let freq: Frequency = serde_json::from_str(r#"{"type":"weekly","days":["Mon","Thu"]}"#).unwrap();
        assert_eq!(freq, Frequency::weekly([Weekday::Mon, Weekday::Thu]));
    }

    #[test]
    fn test_weekly_without_days_deserializes() {
        let freq: Frequency = serde_json::from_str(r#"{"type":"weekly"}"#).unwrap();
        assert_eq!(freq, Frequency::Weekly { days: vec![] });
    }

    #[test]
    fn test_parse_frequency() {
        assert_eq!(Frequency::parse("Daily", &[]).unwrap(), Frequency::Daily);

        let days = vec!["wed".to_string(), "Mon".to_string(), "monday".to_string()];
        assert_eq!(
            Frequency::parse("weekly", &days).unwrap(),
            Frequency::weekly([Weekday::Mon, Weekday::Wed])
        );

        assert!(Frequency::parse("hourly", &[]).is_err());
        assert!(Frequency::parse("weekly", &["funday".to_string()]).is_err());
        assert!(Frequency::parse("daily", &["mon".to_string()]).is_err());
    }

    #[test]
    fn test_time_of_day_parse() {
        assert_eq!("Evening".parse::<TimeOfDay>().unwrap(), TimeOfDay::Evening);
        assert!("midnight".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_habit_id_round_trips_as_string() {
        let id = HabitId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        assert_eq!(HabitId::from_string(&id.to_string()).unwrap(), id);
        assert!(HabitId::from_string("not-a-uuid").is_err());
    }
}

//! Habit entity and related functionality
//!
//! This module defines the Habit struct, the field set used to create one,
//! and the partial update that can be merged into an existing habit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{streak, Completions, DayKey, DomainError, Frequency, HabitId, TimeOfDay};

/// Longest accepted habit name, in characters
pub const MAX_NAME_LEN: usize = 100;
/// Longest accepted description, in characters
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// A habit the user wants to do regularly
///
/// `completions` and `streak` are only changed through the habit store, which
/// keeps the cached streak in step with the history. Everything else is plain
/// data for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Morning Run")
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Display token, opaque to the core
    #[serde(default)]
    pub icon: String,
    /// Display token, opaque to the core
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<TimeOfDay>,
    /// Optional numeric target, opaque to the core
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<u32>,
    /// When this habit was created
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    completions: Completions,
    #[serde(default)]
    streak: u32,
}

/// Fields supplied when creating a habit
///
/// Everything except the id, creation time, history and streak, which the
/// store assigns itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHabit {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default)]
    pub time_of_day: Option<TimeOfDay>,
    #[serde(default)]
    pub goal: Option<u32>,
}

impl NewHabit {
    /// Convenience constructor for a daily habit with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Check the user-entered text fields before the habit is created
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name(&self.name)?;
        validate_description(&self.description)?;
        validate_goal(self.goal)
    }
}

/// A partial update to a habit's user-editable fields
///
/// `None` leaves a field untouched. For the optional fields, `Some(None)`
/// clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub frequency: Option<Frequency>,
    pub time_of_day: Option<Option<TimeOfDay>>,
    pub goal: Option<Option<u32>>,
}

impl HabitUpdate {
    /// Whether the update would change nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check any text fields the update sets
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(ref name) = self.name {
            validate_name(name)?;
        }
        if let Some(ref description) = self.description {
            validate_description(description)?;
        }
        if let Some(goal) = self.goal {
            validate_goal(goal)?;
        }
        Ok(())
    }
}

impl Habit {
    /// Create a fresh habit with a new id, no history and a zero streak
    pub fn create(fields: NewHabit) -> Self {
        Self {
            id: HabitId::new(),
            name: fields.name,
            description: fields.description,
            icon: fields.icon,
            color: fields.color,
            frequency: fields.frequency,
            time_of_day: fields.time_of_day,
            goal: fields.goal,
            created_at: Utc::now(),
            completions: Completions::new(),
            streak: 0,
        }
    }

    /// Completion history, oldest day first
    pub fn completions(&self) -> &Completions {
        &self.completions
    }

    /// Cached current streak, as of the last refresh
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Whether the habit was completed on the given day
    pub fn is_completed_on(&self, day: DayKey) -> bool {
        self.completions.is_completed(day)
    }

    /// Merge a partial update into this habit
    ///
    /// Identity, creation time, history and streak are never touched.
    pub(crate) fn apply(&mut self, update: HabitUpdate) {
        let HabitUpdate {
            name,
            description,
            icon,
            color,
            frequency,
            time_of_day,
            goal,
        } = update;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(icon) = icon {
            self.icon = icon;
        }
        if let Some(color) = color {
            self.color = color;
        }
        if let Some(frequency) = frequency {
            self.frequency = frequency;
        }
        if let Some(time_of_day) = time_of_day {
            self.time_of_day = time_of_day;
        }
        if let Some(goal) = goal {
            self.goal = goal;
        }
    }

    /// Flip the completion flag for a day and recompute the cached streak
    pub(crate) fn toggle(&mut self, day: DayKey, today: DayKey) -> bool {
        let completed = self.completions.toggle(day);
        self.streak = streak::compute_streak_on(&self.completions, today);
        completed
    }

    /// Recompute the cached streak, returning true if it changed
    pub(crate) fn refresh_streak(&mut self, today: DayKey) -> bool {
        let fresh = streak::compute_streak_on(&self.completions, today);
        let changed = fresh != self.streak;
        self.streak = fresh;
        changed
    }
}

// Validation helpers

fn validate_name(name: &str) -> Result<(), DomainError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(DomainError::InvalidHabitName(
            "Habit name cannot be empty".to_string(),
        ));
    }

    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::InvalidHabitName(format!(
            "Habit name cannot be longer than {} characters",
            MAX_NAME_LEN
        )));
    }

    Ok(())
}

fn validate_description(description: &str) -> Result<(), DomainError> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(DomainError::Validation {
            message: format!(
                "Description cannot be longer than {} characters",
                MAX_DESCRIPTION_LEN
            ),
        });
    }
    Ok(())
}

fn validate_goal(goal: Option<u32>) -> Result<(), DomainError> {
    if goal == Some(0) {
        return Err(DomainError::InvalidValue {
            message: "Goal must be greater than 0".to_string(),
        });
    }
    Ok(())
}

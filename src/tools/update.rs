//! Tool for updating existing habits
//!
//! This module implements the habit_update MCP tool to modify a habit's
//! name, display tokens, frequency, time of day or goal. History and streak
//! cannot be changed this way.

use serde::{Deserialize, Serialize};

use crate::domain::{Frequency, HabitUpdate, TimeOfDay};
use crate::storage::KeyValueStorage;
use crate::store::HabitStore;
use crate::tools::{parse_habit_id, ToolError};

/// Parameters for updating an existing habit
#[derive(Debug, Default, Deserialize)]
pub struct UpdateHabitParams {
    /// Habit to update
    pub habit_id: String,
    /// New name (optional)
    pub name: Option<String>,
    /// New description (optional)
    pub description: Option<String>,
    /// New icon (optional)
    pub icon: Option<String>,
    /// New color (optional)
    pub color: Option<String>,
    /// New frequency, "daily" or "weekly" (optional)
    pub frequency: Option<String>,
    /// Weekday names, only used with a weekly frequency
    pub days: Option<Vec<String>>,
    /// New time of day (optional)
    pub time_of_day: Option<String>,
    /// New goal (optional)
    pub goal: Option<u32>,
    /// Optional fields to clear: "time_of_day", "goal"
    #[serde(default)]
    pub clear: Vec<String>,
}

/// Response from updating a habit
#[derive(Debug, Serialize)]
pub struct UpdateHabitResponse {
    /// False when no habit has the given id
    pub changed: bool,
    /// Human-readable summary
    pub message: String,
}

/// Update an existing habit in the given store
pub fn update_habit<S: KeyValueStorage>(
    store: &mut HabitStore<S>,
    params: UpdateHabitParams,
) -> Result<UpdateHabitResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let update = build_update(params)?;
    update.validate()?;

    if update.is_empty() {
        return Ok(UpdateHabitResponse {
            changed: false,
            message: "No changes requested".to_string(),
        });
    }

    if !store.update_habit(&habit_id, update) {
        return Ok(UpdateHabitResponse {
            changed: false,
            message: format!("No habit found with ID {}, nothing changed", habit_id),
        });
    }

    let name = store
        .get_habit(&habit_id)
        .map(|h| h.name.clone())
        .unwrap_or_default();

    Ok(UpdateHabitResponse {
        changed: true,
        message: format!("✅ Updated habit '{}'", name),
    })
}

/// Translate tool arguments into a partial update
fn build_update(params: UpdateHabitParams) -> Result<HabitUpdate, ToolError> {
    let frequency = match (params.frequency.as_deref(), params.days) {
        (Some(kind), days) => Some(Frequency::parse(kind, &days.unwrap_or_default())?),
        (None, Some(days)) => Some(Frequency::parse("weekly", &days)?),
        (None, None) => None,
    };

    let mut time_of_day = match params.time_of_day.as_deref() {
        Some(raw) => Some(Some(raw.parse::<TimeOfDay>()?)),
        None => None,
    };
    let mut goal = params.goal.map(Some);

    for field in &params.clear {
        match field.trim() {
            "time_of_day" => time_of_day = Some(None),
            "goal" => goal = Some(None),
            other => {
                return Err(ToolError::InvalidArguments(format!(
                    "cannot clear '{}'. Clearable fields: time_of_day, goal",
                    other
                )))
            }
        }
    }

    Ok(HabitUpdate {
        name: params.name.map(|n| n.trim().to_string()),
        description: params.description,
        icon: params.icon,
        color: params.color,
        frequency,
        time_of_day,
        goal,
    })
}

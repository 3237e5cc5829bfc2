//! Tool for toggling a day's completion
//!
//! This module implements the habit_toggle MCP tool.

use serde::{Deserialize, Serialize};

use crate::domain::streak;
use crate::storage::KeyValueStorage;
use crate::store::HabitStore;
use crate::tools::{parse_day, parse_habit_id, plural_days, ToolError};

/// Parameters for toggling a habit's completion
#[derive(Debug, Deserialize)]
pub struct ToggleParams {
    /// Habit to toggle
    pub habit_id: String,
    /// Day to toggle (YYYY-MM-DD), defaults to today
    pub date: Option<String>,
}

/// Response from toggling a habit
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    /// False when no habit has the given id
    pub changed: bool,
    /// New completion state for the day
    pub completed: Option<bool>,
    /// Streak after the toggle
    pub current_streak: Option<u32>,
    /// Human-readable summary
    pub message: String,
}

/// Flip the completion flag of a habit for one day
pub fn toggle_habit<S: KeyValueStorage>(
    store: &mut HabitStore<S>,
    params: ToggleParams,
) -> Result<ToggleResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let day = parse_day(params.date.as_deref())?;

    let Some(completed) = store.toggle_completion(&habit_id, day) else {
        return Ok(ToggleResponse {
            changed: false,
            completed: None,
            current_streak: None,
            message: format!("No habit found with ID {}, nothing changed", habit_id),
        });
    };

    let current = store.get_habit(&habit_id).map(|h| h.streak()).unwrap_or(0);

    let message = if completed {
        format!(
            "🔥 Marked {} as done! Current streak: {}\n{}",
            day,
            plural_days(current),
            streak::motivational_message(current)
        )
    } else {
        format!(
            "↩️ Unmarked {}. Current streak: {}",
            day,
            plural_days(current)
        )
    };

    Ok(ToggleResponse {
        changed: true,
        completed: Some(completed),
        current_streak: Some(current),
        message,
    })
}

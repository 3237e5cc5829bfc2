//! Tool for listing all habits
//!
//! This module implements the habit_list MCP tool.

use serde::{Deserialize, Serialize};

use crate::domain::{dates, streak, Habit};
use crate::storage::KeyValueStorage;
use crate::store::HabitStore;
use crate::tools::{plural_days, ToolError};

/// Parameters for listing habits
#[derive(Debug, Default, Deserialize)]
pub struct ListHabitsParams {
    /// "created" (default), "name" or "streak"
    pub sort_by: Option<String>,
}

/// One line of the habit list
#[derive(Debug, Clone, Serialize)]
pub struct HabitSummary {
    /// Habit ID
    pub habit_id: String,
    /// Display name
    pub name: String,
    /// Emoji icon
    pub icon: String,
    /// Frequency label, e.g. "daily" or "weekly (Mon, Thu)"
    pub frequency: String,
    pub time_of_day: Option<String>,
    /// Current streak in days
    pub streak: u32,
    /// Whether the streak has reached a milestone
    pub milestone: bool,
    /// Whether today is marked done
    pub completed_today: bool,
}

impl HabitSummary {
    pub fn from_habit(habit: &Habit) -> Self {
        Self {
            habit_id: habit.id.to_string(),
            name: habit.name.clone(),
            icon: habit.icon.clone(),
            frequency: habit.frequency.to_string(),
            time_of_day: habit.time_of_day.map(|t| t.as_str().to_string()),
            streak: habit.streak(),
            milestone: streak::is_milestone(habit.streak()),
            completed_today: habit.is_completed_on(dates::today()),
        }
    }

    /// Single-entry text rendering
    pub fn render(&self) -> String {
        format!(
            "{} **{}** {}\n   ID: {} | 📅 {} | 🔥 Streak: {}{}",
            self.icon,
            self.name,
            if self.completed_today { "✅" } else { "⬜" },
            self.habit_id,
            self.frequency,
            plural_days(self.streak),
            if self.milestone { " 🏆" } else { "" }
        )
    }
}

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    /// Habits in the requested order
    pub habits: Vec<HabitSummary>,
    /// Total number of habits
    pub total_habits: usize,
    /// How many habits are done today
    pub completed_today: usize,
    /// Formatted listing
    pub message: String,
}

/// List habits from the given store
pub fn list_habits<S: KeyValueStorage>(
    store: &HabitStore<S>,
    params: ListHabitsParams,
) -> Result<ListHabitsResponse, ToolError> {
    let mut habits: Vec<HabitSummary> = store.habits().iter().map(HabitSummary::from_habit).collect();

    match params.sort_by.as_deref().map(|s| s.trim().to_lowercase()).as_deref() {
        None | Some("created") => {}
        Some("name") => habits.sort_by_key(|h| h.name.to_lowercase()),
        Some("streak") => habits.sort_by(|a, b| b.streak.cmp(&a.streak)),
        Some(other) => {
            return Err(ToolError::InvalidArguments(format!(
                "cannot sort by '{}'. Valid options: created, name, streak",
                other
            )))
        }
    }

    let total_habits = store.total_habits();
    let completed_today = store.completed_today();

    let message = if habits.is_empty() {
        "No habits found. Create your first habit to get started!".to_string()
    } else {
        let lines: Vec<String> = habits.iter().map(HabitSummary::render).collect();
        format!(
            "📋 **Habits** ({} of {} done today)\n\n{}",
            completed_today,
            total_habits,
            lines.join("\n\n")
        )
    };

    Ok(ListHabitsResponse {
        habits,
        total_habits,
        completed_today,
        message,
    })
}

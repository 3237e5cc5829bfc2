//! Tool for checking a single habit's status
//!
//! This module implements the habit_status MCP tool: the habit's details,
//! its progress numbers and a calendar strip of recent days.

use serde::{Deserialize, Serialize};

use crate::analytics::{self, CalendarDay, HabitProgress};
use crate::domain::{dates, streak};
use crate::storage::KeyValueStorage;
use crate::store::HabitStore;
use crate::tools::{parse_habit_id, plural_days, HabitSummary, ToolError};

/// Default length of the calendar strip
pub const DEFAULT_CALENDAR_DAYS: usize = 7;
/// Longest calendar strip the tool will render
pub const MAX_CALENDAR_DAYS: usize = 366;

/// Parameters for checking habit status
#[derive(Debug, Deserialize)]
pub struct StatusParams {
    /// Habit to inspect
    pub habit_id: String,
    /// Number of recent days in the calendar strip
    pub days: Option<usize>,
}

/// Response from checking habit status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// False when no habit has the given id
    pub found: bool,
    /// Summary of the habit
    pub habit: Option<HabitSummary>,
    /// Completion numbers over the habit's lifetime
    pub progress: Option<HabitProgress>,
    /// Recent days, oldest first
    pub calendar: Vec<CalendarDay>,
    /// Formatted status report
    pub message: String,
}

/// Get status for one habit from the given store
pub fn get_habit_status<S: KeyValueStorage>(
    store: &HabitStore<S>,
    params: StatusParams,
) -> Result<StatusResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;

    let days = params.days.unwrap_or(DEFAULT_CALENDAR_DAYS);
    if days == 0 || days > MAX_CALENDAR_DAYS {
        return Err(ToolError::InvalidArguments(format!(
            "days must be between 1 and {}",
            MAX_CALENDAR_DAYS
        )));
    }

    let Some(habit) = store.get_habit(&habit_id) else {
        return Ok(StatusResponse {
            found: false,
            habit: None,
            progress: None,
            calendar: Vec::new(),
            message: format!("No habit found with ID {}", habit_id),
        });
    };

    let summary = HabitSummary::from_habit(habit);
    let progress = analytics::habit_progress(habit);
    let calendar = analytics::calendar(habit, dates::today(), days);

    let strip: String = calendar
        .iter()
        .map(|c| if c.completed { '■' } else { '□' })
        .collect();

    let mut message = format!(
        "{}\n\n📊 Rate: {:.1}% ({} of {} recorded days) | 🏅 Best: {}\n📆 Last {}: {}\n{}",
        summary.render(),
        progress.completion_rate * 100.0,
        progress.completed_days,
        progress.recorded_days,
        plural_days(progress.longest_streak),
        plural_days(days as u32),
        strip,
        streak::motivational_message(progress.current_streak)
    );
    if !habit.description.is_empty() {
        message = format!("{}\n\n{}", message, habit.description);
    }

    Ok(StatusResponse {
        found: true,
        habit: Some(summary),
        progress: Some(progress),
        calendar,
        message,
    })
}

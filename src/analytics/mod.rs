//! Read-only summaries derived from the habit collection
//!
//! Nothing here changes state. Every number is derived from the completion
//! maps and the cached streaks, as of the day passed in.

use serde::Serialize;

use crate::domain::{dates, streak, DayKey, Habit};

/// Collection-wide numbers for a stats screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total_habits: usize,
    pub completed_today: usize,
    /// Share of habits completed today, 0.0 to 1.0
    pub completion_rate_today: f64,
    /// Highest cached streak across all habits
    pub longest_streak: u32,
    /// Count of completed days across all habits
    pub total_completions: usize,
}

/// Per-habit progress numbers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitProgress {
    pub recorded_days: usize,
    pub completed_days: usize,
    /// Completed days over recorded days, 0.0 to 1.0
    pub completion_rate: f64,
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// One cell of a calendar strip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub day: DayKey,
    pub day_name: String,
    pub day_number: u32,
    pub completed: bool,
}

pub fn overview(habits: &[Habit], today: DayKey) -> Overview {
    let total_habits = habits.len();
    let completed_today = habits.iter().filter(|h| h.is_completed_on(today)).count();

    let completion_rate_today = if total_habits > 0 {
        completed_today as f64 / total_habits as f64
    } else {
        0.0
    };

    Overview {
        total_habits,
        completed_today,
        completion_rate_today,
        longest_streak: habits.iter().map(Habit::streak).max().unwrap_or(0),
        total_completions: habits.iter().map(|h| h.completions().completed_count()).sum(),
    }
}

pub fn habit_progress(habit: &Habit) -> HabitProgress {
    let completions = habit.completions();
    let recorded_days = completions.recorded_count();
    let completed_days = completions.completed_count();

    let completion_rate = if recorded_days > 0 {
        completed_days as f64 / recorded_days as f64
    } else {
        0.0
    };

    HabitProgress {
        recorded_days,
        completed_days,
        completion_rate,
        current_streak: habit.streak(),
        longest_streak: streak::longest_streak(completions).max(habit.streak()),
    }
}

/// The last `days` days ending at `today`, oldest first
pub fn calendar(habit: &Habit, today: DayKey, days: usize) -> Vec<CalendarDay> {
    dates::last_n_days_from(today, days)
        .into_iter()
        .map(|day| CalendarDay {
            day,
            day_name: dates::day_name(day),
            day_number: dates::day_number(day),
            completed: habit.is_completed_on(day),
        })
        .collect()
}

/// Habits ordered by cached streak, highest first; ties keep collection order
pub fn rank_by_streak(habits: &[Habit]) -> Vec<&Habit> {
    let mut ranked: Vec<&Habit> = habits.iter().collect();
    ranked.sort_by(|a, b| b.streak().cmp(&a.streak()));
    ranked
}

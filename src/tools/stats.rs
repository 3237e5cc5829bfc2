//! Tool for collection-wide statistics
//!
//! This module implements the habit_stats MCP tool.

use serde::{Deserialize, Serialize};

use crate::analytics::{self, Overview};
use crate::domain::dates;
use crate::storage::KeyValueStorage;
use crate::store::HabitStore;
use crate::tools::{plural_days, HabitSummary, ToolError};

const DEFAULT_TOP: usize = 5;

#[derive(Debug, Default, Deserialize)]
pub struct StatsParams {
    /// How many habits to show in the streak ranking
    pub top: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Totals across all habits
    pub overview: Overview,
    /// Habits with the longest current streaks
    pub top_streaks: Vec<HabitSummary>,
    /// Formatted statistics
    pub message: String,
}

pub fn get_stats<S: KeyValueStorage>(
    store: &HabitStore<S>,
    params: StatsParams,
) -> Result<StatsResponse, ToolError> {
    let overview = analytics::overview(store.habits(), dates::today());
    let top_streaks: Vec<HabitSummary> = analytics::rank_by_streak(store.habits())
        .into_iter()
        .take(params.top.unwrap_or(DEFAULT_TOP))
        .map(HabitSummary::from_habit)
        .collect();

    let mut message = format!(
        "📊 **Your Stats**\n- Today: {}/{} habits completed ({:.0}%)\n- Longest streak: {}\n- Total completions: {}",
        overview.completed_today,
        overview.total_habits,
        overview.completion_rate_today * 100.0,
        plural_days(overview.longest_streak),
        overview.total_completions
    );

    if !top_streaks.is_empty() {
        let ranking: Vec<String> = top_streaks
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{}. {} {} ({})", i + 1, h.icon, h.name, plural_days(h.streak)))
            .collect();
        message = format!("{}\n\n🔥 **Streaks**\n{}", message, ranking.join("\n"));
    }

    Ok(StatsResponse {
        overview,
        top_streaks,
        message,
    })
}

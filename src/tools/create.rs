//! Tool for creating new habits
//!
//! This module implements the habit_create MCP tool.

use serde::{Deserialize, Serialize};

use crate::domain::{Frequency, NewHabit, TimeOfDay};
use crate::storage::KeyValueStorage;
use crate::store::HabitStore;
use crate::tools::ToolError;

/// Icon used when the caller does not pick one
pub const DEFAULT_ICON: &str = "🏃";
/// Color used when the caller does not pick one
pub const DEFAULT_COLOR: &str = "#6AADDF";

/// Parameters for creating a new habit
#[derive(Debug, Default, Deserialize)]
pub struct CreateHabitParams {
    /// Display name of the habit
    pub name: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Emoji shown next to the name
    pub icon: Option<String>,
    /// Hex color such as "#6AADDF"
    pub color: Option<String>,
    /// "daily" (default) or "weekly"
    pub frequency: Option<String>,
    /// Weekday names for weekly habits, e.g. ["mon", "thu"]
    #[serde(default)]
    pub days: Vec<String>,
    /// "morning", "afternoon", "evening" or "anytime"
    pub time_of_day: Option<String>,
    /// Target number of completions
    pub goal: Option<u32>,
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    /// Whether the habit was created
    pub success: bool,
    /// ID of the newly created habit
    pub habit_id: String,
    /// Human-readable confirmation
    pub message: String,
}

/// Create a new habit in the given store
pub fn create_habit<S: KeyValueStorage>(
    store: &mut HabitStore<S>,
    params: CreateHabitParams,
) -> Result<CreateHabitResponse, ToolError> {
    let frequency = match params.frequency.as_deref() {
        Some(kind) => Frequency::parse(kind, &params.days)?,
        None if params.days.is_empty() => Frequency::Daily,
        None => Frequency::parse("weekly", &params.days)?,
    };

    let time_of_day = match params.time_of_day.as_deref() {
        Some(raw) => raw.parse::<TimeOfDay>()?,
        None => TimeOfDay::Anytime,
    };

    let fields = NewHabit {
        name: params.name.trim().to_string(),
        description: params.description.unwrap_or_default(),
        icon: params.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
        color: params.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        frequency,
        time_of_day: Some(time_of_day),
        goal: params.goal,
    };
    fields.validate()?;

    let name = fields.name.clone();
    let habit_id = store.add_habit(fields);

    Ok(CreateHabitResponse {
        success: true,
        habit_id: habit_id.to_string(),
        message: format!("✅ Created habit '{}'! Ready to start your streak!", name),
    })
}

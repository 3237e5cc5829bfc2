//! Tool for deleting habits
//!
//! This module implements the habit_delete MCP tool. Deletion is permanent:
//! the habit and its history leave the collection.

use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStorage;
use crate::store::HabitStore;
use crate::tools::{parse_habit_id, ToolError};

#[derive(Debug, Deserialize)]
pub struct DeleteHabitParams {
    /// Habit to delete
    pub habit_id: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteHabitResponse {
    /// Whether a habit was removed
    pub deleted: bool,
    /// Human-readable summary
    pub message: String,
}

pub fn delete_habit<S: KeyValueStorage>(
    store: &mut HabitStore<S>,
    params: DeleteHabitParams,
) -> Result<DeleteHabitResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let name = store.get_habit(&habit_id).map(|h| h.name.clone());

    let deleted = store.delete_habit(&habit_id);
    let message = match name {
        Some(name) if deleted => format!("🗑️ Deleted habit '{}'", name),
        _ => format!("No habit found with ID {}, nothing changed", habit_id),
    };

    Ok(DeleteHabitResponse { deleted, message })
}

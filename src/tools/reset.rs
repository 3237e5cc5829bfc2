//! Tool for wiping all habit data
//!
//! This module implements the habit_reset MCP tool. It refuses to run
//! without an explicit confirmation flag.

use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStorage;
use crate::store::HabitStore;
use crate::tools::ToolError;

#[derive(Debug, Default, Deserialize)]
pub struct ResetParams {
    /// Must be true for anything to be deleted
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    /// Number of habits removed
    pub removed: usize,
    /// Human-readable summary
    pub message: String,
}

pub fn reset_all<S: KeyValueStorage>(
    store: &mut HabitStore<S>,
    params: ResetParams,
) -> Result<ResetResponse, ToolError> {
    if !params.confirm {
        return Err(ToolError::NotConfirmed(
            "Resetting deletes every habit and its history. Call again with confirm: true".to_string(),
        ));
    }

    let removed = store.total_habits();
    store.reset_all_data();

    Ok(ResetResponse {
        removed,
        message: format!("🧹 Removed {} habit{}", removed, if removed == 1 { "" } else { "s" }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewHabit;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_reset_requires_confirmation() {
        let mut store = HabitStore::load(MemoryStorage::new());
        store.add_habit(NewHabit::named("a"));

        assert!(reset_all(&mut store, ResetParams::default()).is_err());
        assert_eq!(store.total_habits(), 1);

        let response = reset_all(&mut store, ResetParams { confirm: true }).unwrap();
        assert_eq!(response.removed, 1);
        assert_eq!(store.total_habits(), 0);
        assert_eq!(store.completed_today(), 0);
    }
}

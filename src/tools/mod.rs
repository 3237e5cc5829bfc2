//! MCP tools for habit management
//!
//! Each tool parses its arguments, calls exactly one store or analytics
//! operation, and renders a short text message. Argument problems are tool
//! errors; an unknown habit id is not, because the store treats it as a no-op.

pub mod create;
pub mod delete;
pub mod list;
pub mod reset;
pub mod settings;
pub mod stats;
pub mod status;
pub mod toggle;
pub mod update;

// Re-export tool functions for easy access
pub use create::*;
pub use delete::*;
pub use list::*;
pub use reset::*;
pub use settings::*;
pub use stats::*;
pub use status::*;
pub use toggle::*;
pub use update::*;

use thiserror::Error;

use crate::domain::{dates, DayKey, DomainError, HabitId};

/// Errors reported back to the tool caller
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid habit ID '{0}'")]
    InvalidHabitId(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("{0}")]
    NotConfirmed(String),
}

/// Parse a habit id argument
pub fn parse_habit_id(raw: &str) -> Result<HabitId, ToolError> {
    HabitId::from_string(raw).map_err(|_| ToolError::InvalidHabitId(raw.to_string()))
}

/// Parse an optional `YYYY-MM-DD` argument, defaulting to today
pub fn parse_day(raw: Option<&str>) -> Result<DayKey, ToolError> {
    match raw {
        Some(s) => Ok(s.parse()?),
        None => Ok(dates::today()),
    }
}

/// "1 day" / "3 days"
pub(crate) fn plural_days(n: u32) -> String {
    format!("{} day{}", n, if n == 1 { "" } else { "s" })
}

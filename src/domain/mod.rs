//! Domain module containing core business logic and data types
//!
//! This module defines the core entities (Habit, Completions, DayKey) and the
//! pure streak calculation over them. Nothing in here performs I/O.

pub mod completions;
pub mod dates;
pub mod habit;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use completions::*;
pub use dates::DayKey;
pub use habit::*;
pub use streak::{compute_streak, compute_streak_on, longest_streak};
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time of day '{0}'. Valid options: morning, afternoon, evening, anytime")]
    InvalidTimeOfDay(String),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },
}

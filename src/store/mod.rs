//! In-process state owners
//!
//! Each store owns one persisted record and is the only way to change it.

pub mod habits;
pub mod settings;

pub use habits::{HabitStore, HABIT_RECORD_KEY};
pub use settings::{Appearance, ColorScheme, Settings, SettingsStore, SETTINGS_RECORD_KEY};

//! Per-habit completion history
//!
//! A habit's history is a map from day key to "completed that day". A missing
//! key means nothing was recorded, which is not the same as an explicit
//! `false` left behind by toggling a day off again.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::DayKey;

/// Mapping of calendar day to completion flag, ordered oldest day first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Completions(BTreeMap<DayKey, bool>);

impl Completions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded value for a day, `None` if the day was never touched
    pub fn get(&self, day: DayKey) -> Option<bool> {
        self.0.get(&day).copied()
    }

    /// Whether the day is recorded as completed
    pub fn is_completed(&self, day: DayKey) -> bool {
        self.get(day).unwrap_or(false)
    }

    /// Flip the flag for a day and return the new value
    ///
    /// An unrecorded day counts as `false`, so the first toggle sets `true`.
    pub(crate) fn toggle(&mut self, day: DayKey) -> bool {
        let flag = self.0.entry(day).or_insert(false);
        *flag = !*flag;
        *flag
    }

    /// Days recorded as completed, oldest first
    pub fn completed_days(&self) -> impl DoubleEndedIterator<Item = DayKey> + '_ {
        self.0
            .iter()
            .filter(|(_, completed)| **completed)
            .map(|(day, _)| *day)
    }

    /// Number of days with any recorded value
    pub fn recorded_count(&self) -> usize {
        self.0.len()
    }

    /// Number of days recorded as completed
    pub fn completed_count(&self) -> usize {
        self.0.values().filter(|completed| **completed).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over every recorded day and its flag, oldest first
    pub fn iter(&self) -> impl Iterator<Item = (DayKey, bool)> + '_ {
        self.0.iter().map(|(day, completed)| (*day, *completed))
    }
}

impl FromIterator<(DayKey, bool)> for Completions {
    fn from_iter<T: IntoIterator<Item = (DayKey, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

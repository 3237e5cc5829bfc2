//! The habit store
//!
//! Owns the habit collection. Every mutation updates the in-memory collection
//! first and then writes a full snapshot to the key-value medium. A failed
//! write is logged and otherwise ignored: the in-memory state stays correct
//! and the next successful write carries it to disk.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::{dates, DayKey, Habit, HabitId, HabitUpdate, NewHabit};
use crate::storage::KeyValueStorage;

/// Record key holding the habit collection
pub const HABIT_RECORD_KEY: &str = "habit-storage";

/// Persisted form of the collection: `{ "habits": [...] }`
///
/// Entries stay raw until each one is decoded on its own, so one bad habit
/// cannot take the rest of the collection down with it.
#[derive(Debug, Default, Deserialize)]
struct HabitSnapshot {
    #[serde(default)]
    habits: Vec<serde_json::Value>,
}

#[derive(Serialize)]
struct HabitSnapshotRef<'a> {
    habits: &'a [Habit],
}

/// Single owner of the habit collection
///
/// Operations that reference an unknown habit id are silent no-ops, so
/// callers never need to check existence first. The returned values only
/// report what happened.
pub struct HabitStore<S: KeyValueStorage> {
    storage: S,
    habits: Vec<Habit>,
}

impl<S: KeyValueStorage> HabitStore<S> {
    /// Load the collection from storage
    ///
    /// A missing record starts an empty collection. An unreadable or
    /// malformed record is logged and also starts empty; a single habit that
    /// fails to decode is logged and skipped. Cached streaks are refreshed
    /// against today before the store is handed out.
    pub fn load(storage: S) -> Self {
        Self::load_on(storage, dates::today())
    }

    /// Same as [`load`](Self::load), with cached streaks refreshed as of `today`
    pub fn load_on(storage: S, today: DayKey) -> Self {
        let entries = match storage.get(HABIT_RECORD_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<HabitSnapshot>(&raw) {
                Ok(snapshot) => snapshot.habits,
                Err(e) => {
                    warn!("Discarding malformed habit record: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read habit record, starting empty: {}", e);
                Vec::new()
            }
        };

        let mut store = Self {
            storage,
            habits: Vec::new(),
        };

        for (position, entry) in entries.into_iter().enumerate() {
            let habit: Habit = match serde_json::from_value(entry) {
                Ok(habit) => habit,
                Err(e) => {
                    warn!("Skipping unreadable habit at position {}: {}", position, e);
                    continue;
                }
            };
            if store.index_of(&habit.id).is_some() {
                warn!("Dropping duplicate habit id {} from stored record", habit.id);
                continue;
            }
            store.habits.push(habit);
        }

        info!("Loaded {} habits", store.habits.len());

        if store.refresh_cached_streaks(today) > 0 {
            store.persist();
        }

        store
    }

    /// All habits in insertion order
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    /// Create a habit from the given fields and return its new id
    pub fn add_habit(&mut self, fields: NewHabit) -> HabitId {
        let habit = Habit::create(fields);
        let id = habit.id.clone();

        debug!("Added habit '{}' ({})", habit.name, id);
        self.habits.push(habit);
        self.persist();

        id
    }

    /// Flip the completion flag for `day` and refresh the habit's streak
    ///
    /// Returns the new flag, or `None` (and changes nothing) if no habit has
    /// this id.
    pub fn toggle_completion(&mut self, id: &HabitId, day: DayKey) -> Option<bool> {
        self.toggle_completion_on(id, day, dates::today())
    }

    /// Same as [`toggle_completion`](Self::toggle_completion), with the
    /// streak computed as of `today`
    pub fn toggle_completion_on(&mut self, id: &HabitId, day: DayKey, today: DayKey) -> Option<bool> {
        let habit = self.habits.iter_mut().find(|h| &h.id == id)?;

        let completed = habit.toggle(day, today);
        debug!(
            "Toggled {} on {} -> {} (streak {})",
            id,
            day,
            completed,
            habit.streak()
        );

        self.persist();
        Some(completed)
    }

    /// Remove a habit, returning whether one was removed
    pub fn delete_habit(&mut self, id: &HabitId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };

        let removed = self.habits.remove(index);
        debug!("Deleted habit '{}' ({})", removed.name, id);
        self.persist();
        true
    }

    /// Merge a partial update into a habit, returning whether it exists
    pub fn update_habit(&mut self, id: &HabitId, update: HabitUpdate) -> bool {
        let Some(habit) = self.habits.iter_mut().find(|h| &h.id == id) else {
            return false;
        };

        habit.apply(update);
        debug!("Updated habit '{}' ({})", habit.name, id);
        self.persist();
        true
    }

    pub fn get_habit(&self, id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| &h.id == id)
    }

    /// Number of habits completed today
    pub fn completed_today(&self) -> usize {
        self.completed_on(dates::today())
    }

    /// Number of habits completed on `day`
    pub fn completed_on(&self, day: DayKey) -> usize {
        self.habits
            .iter()
            .filter(|h| h.is_completed_on(day))
            .count()
    }

    pub fn total_habits(&self) -> usize {
        self.habits.len()
    }

    /// Remove every habit
    pub fn reset_all_data(&mut self) {
        info!("Resetting all habit data ({} habits)", self.habits.len());
        self.habits.clear();
        self.persist();
    }

    /// Recompute every cached streak against today
    ///
    /// Streaks are otherwise only recomputed when a completion changes, so a
    /// caller that stays up across midnight should call this on day rollover.
    /// Returns how many streaks changed; storage is only written if any did.
    pub fn refresh_streaks(&mut self) -> usize {
        self.refresh_streaks_on(dates::today())
    }

    /// Recompute every cached streak as of `today`
    pub fn refresh_streaks_on(&mut self, today: DayKey) -> usize {
        let changed = self.refresh_cached_streaks(today);
        if changed > 0 {
            debug!("Refreshed {} stale streaks", changed);
            self.persist();
        }
        changed
    }

    fn refresh_cached_streaks(&mut self, today: DayKey) -> usize {
        let mut changed = 0;
        for habit in &mut self.habits {
            if habit.refresh_streak(today) {
                changed += 1;
            }
        }
        changed
    }

    fn index_of(&self, id: &HabitId) -> Option<usize> {
        self.habits.iter().position(|h| &h.id == id)
    }

    /// Write the full collection snapshot; failures are logged, not returned
    fn persist(&self) {
        let snapshot = HabitSnapshotRef {
            habits: &self.habits,
        };

        let raw = match serde_json::to_string(&snapshot) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Could not serialize habit collection: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.set(HABIT_RECORD_KEY, &raw) {
            warn!("Could not persist habit collection: {}", e);
        }
    }
}

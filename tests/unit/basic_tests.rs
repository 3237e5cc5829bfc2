/// Basic unit tests to verify core functionality through the public API
use habit_streak_tracker::*;
use std::sync::Arc;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    fn day() -> DayKey {
        DayKey::from_ymd(2024, 11, 30).unwrap()
    }

    fn store() -> HabitStore<MemoryStorage> {
        HabitStore::load_on(MemoryStorage::new(), day())
    }

    #[test]
    fn test_add_then_get_starts_clean() {
        let mut store = store();
        let id = store.add_habit(NewHabit {
            name: "Test Habit".to_string(),
            description: "A test habit".to_string(),
            frequency: Frequency::weekly([chrono::Weekday::Tue]),
            time_of_day: Some(TimeOfDay::Evening),
            goal: Some(3),
            ..NewHabit::default()
        });

        let habit = store.get_habit(&id).expect("habit should exist");
        assert_eq!(habit.name, "Test Habit");
        assert_eq!(habit.time_of_day, Some(TimeOfDay::Evening));
        assert_eq!(habit.goal, Some(3));
        assert!(habit.completions().is_empty());
        assert_eq!(habit.streak(), 0);
    }

    #[test]
    fn test_new_habit_validation() {
        assert!(NewHabit::named("Walk").validate().is_ok());
        assert!(NewHabit::named("").validate().is_err());
        assert!(NewHabit::named("x".repeat(MAX_NAME_LEN + 1)).validate().is_err());

        let zero_goal = NewHabit {
            goal: Some(0),
            ..NewHabit::named("Walk")
        };
        assert!(zero_goal.validate().is_err());
    }

    #[test]
    fn test_update_keeps_history() {
        let mut store = store();
        let id = store.add_habit(NewHabit::named("Read"));
        store.toggle_completion_on(&id, day(), day());

        let changed = store.update_habit(&id, HabitUpdate {
            name: Some("Read 20 pages".to_string()),
            ..HabitUpdate::default()
        });
        assert!(changed);

        let habit = store.get_habit(&id).unwrap();
        assert_eq!(habit.name, "Read 20 pages");
        assert!(habit.is_completed_on(day()));
        assert_eq!(habit.streak(), 1);
    }

    #[test]
    fn test_not_found_operations_are_no_ops() {
        let mut store = store();
        store.add_habit(NewHabit::named("Keep me"));
        let ghost = HabitId::new();

        assert_eq!(store.toggle_completion(&ghost, dates::today()), None);
        assert!(!store.delete_habit(&ghost));
        assert!(!store.update_habit(&ghost, HabitUpdate {
            name: Some("nope".to_string()),
            ..HabitUpdate::default()
        }));
        assert!(store.get_habit(&ghost).is_none());
        assert_eq!(store.total_habits(), 1);
    }

    #[test]
    fn test_completed_on_counts_only_that_day() {
        let mut store = store();
        let a = store.add_habit(NewHabit::named("a"));
        let b = store.add_habit(NewHabit::named("b"));
        store.add_habit(NewHabit::named("c"));

        store.toggle_completion_on(&a, day(), day());
        store.toggle_completion_on(&b, day().minus_days(1), day());
        assert_eq!(store.completed_on(day()), 1);

        store.reset_all_data();
        assert_eq!(store.completed_on(day()), 0);
        assert_eq!(store.completed_today(), 0);
        assert!(store.habits().is_empty());
    }

    #[test]
    fn test_failing_storage_keeps_memory_consistent() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_failing(true);

        let mut store = HabitStore::load_on(Arc::clone(&storage), day());
        let id = store.add_habit(NewHabit::named("Offline"));
        assert_eq!(store.toggle_completion_on(&id, day(), day()), Some(true));
        assert_eq!(store.get_habit(&id).unwrap().streak(), 1);

        // nothing reached the medium
        storage.set_failing(false);
        let reloaded = HabitStore::load(Arc::clone(&storage));
        assert_eq!(reloaded.total_habits(), 0);
    }

    #[test]
    fn test_day_keys() {
        let day: DayKey = "2024-03-01".parse().unwrap();
        assert_eq!(day.minus_days(1).to_string(), "2024-02-29");
        assert!("2024-3-1".parse::<DayKey>().is_err());
        assert_eq!(dates::last_n_days(3).last(), Some(&dates::today()));
        assert_eq!(dates::today().days_since(dates::days_ago(4)), 4);
    }

    #[test]
    fn test_color_scheme_defaults() {
        let settings = SettingsStore::load(MemoryStorage::new());
        assert_eq!(settings.color_scheme(), ColorScheme::Auto);
        assert_eq!(settings.settings(), &Settings::default());
        assert_eq!(ColorScheme::Auto.resolve(None), Appearance::Light);
    }
}

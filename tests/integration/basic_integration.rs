/// Basic integration tests against a real database file
use habit_streak_tracker::*;
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    #[test]
    fn test_habits_survive_reopen() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");

        let (id, other) = {
            let mut server = HabitTrackerServer::new(temp_file.path()).expect("Failed to create server");
            let id = server.habits_mut().add_habit(NewHabit::named("Stretch"));
            let other = server.habits_mut().add_habit(NewHabit::named("Journal"));
            let today = dates::today();
            server.habits_mut().toggle_completion_on(&id, today, today);
            server.habits_mut().toggle_completion_on(&id, today.minus_days(1), today);
            (id, other)
        };

        let server = HabitTrackerServer::new(temp_file.path()).expect("Failed to reopen server");
        assert_eq!(server.habits().total_habits(), 2);

        let habit = server.habits().get_habit(&id).expect("habit should be reloaded");
        assert_eq!(habit.name, "Stretch");
        assert_eq!(habit.streak(), 2);
        assert!(habit.is_completed_on(dates::today()));
        assert_eq!(server.habits().completed_today(), 1);

        let untouched = server.habits().get_habit(&other).expect("second habit should be reloaded");
        assert!(untouched.completions().is_empty());
    }

    #[test]
    fn test_delete_and_reset_persist() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");

        {
            let mut server = HabitTrackerServer::new(temp_file.path()).expect("Failed to create server");
            let a = server.habits_mut().add_habit(NewHabit::named("a"));
            server.habits_mut().add_habit(NewHabit::named("b"));
            assert!(server.habits_mut().delete_habit(&a));
        }

        {
            let mut server = HabitTrackerServer::new(temp_file.path()).expect("Failed to reopen server");
            let names: Vec<&str> = server.habits().habits().iter().map(|h| h.name.as_str()).collect();
            assert_eq!(names, vec!["b"]);
            server.habits_mut().reset_all_data();
        }

        let server = HabitTrackerServer::new(temp_file.path()).expect("Failed to reopen server");
        assert_eq!(server.habits().total_habits(), 0);
        assert_eq!(server.habits().completed_today(), 0);
    }

    #[test]
    fn test_settings_survive_reopen() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");

        {
            let mut server = HabitTrackerServer::new(temp_file.path()).expect("Failed to create server");
            assert_eq!(server.settings().color_scheme(), ColorScheme::Auto);
            server.settings_mut().set_color_scheme(ColorScheme::Dark);
        }

        let server = HabitTrackerServer::new(temp_file.path()).expect("Failed to reopen server");
        assert_eq!(server.settings().color_scheme(), ColorScheme::Dark);
        assert_eq!(
            server.settings().color_scheme().resolve(Some(Appearance::Light)),
            Appearance::Dark
        );
    }

    #[test]
    fn test_stores_use_separate_records() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");

        {
            let mut server = HabitTrackerServer::new(temp_file.path()).expect("Failed to create server");
            server.habits_mut().add_habit(NewHabit::named("Run"));
            server.settings_mut().set_color_scheme(ColorScheme::Light);
        }

        let storage = SqliteStorage::new(temp_file.path()).expect("Failed to open storage");
        let habits = storage.get(store::HABIT_RECORD_KEY).unwrap().expect("habit record");
        let settings = storage.get(store::SETTINGS_RECORD_KEY).unwrap().expect("settings record");

        let habits: serde_json::Value = serde_json::from_str(&habits).unwrap();
        assert_eq!(habits["habits"][0]["name"], "Run");
        assert_eq!(habits["habits"][0]["frequency"]["type"], "daily");
        assert!(habits["habits"][0]["createdAt"].is_string());
        assert_eq!(settings, r#"{"colorScheme":"light"}"#);
    }

    #[test]
    fn test_malformed_record_starts_empty() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        {
            let storage = SqliteStorage::new(temp_file.path()).expect("Failed to open storage");
            storage.set(store::HABIT_RECORD_KEY, "{\"habits\": [oops").unwrap();
        }

        let mut server = HabitTrackerServer::new(temp_file.path()).expect("Server should still start");
        assert_eq!(server.habits().total_habits(), 0);

        // the store keeps working after a bad load
        server.habits_mut().add_habit(NewHabit::named("Fresh start"));
        assert_eq!(server.habits().total_habits(), 1);
    }
}

/// Streak behavior checked against fixed calendars and live toggles
use habit_streak_tracker::*;

fn anchor() -> DayKey {
    DayKey::from_ymd(2024, 3, 2).unwrap()
}

/// Completions marked `true` the given number of days before the anchor
fn done(days_ago: &[u64]) -> Completions {
    days_ago.iter().map(|n| (anchor().minus_days(*n), true)).collect()
}

#[test]
fn test_no_true_entries_is_zero() {
    assert_eq!(compute_streak_on(&Completions::new(), anchor()), 0);

    let all_false: Completions = [(anchor(), false), (anchor().minus_days(1), false)]
        .into_iter()
        .collect();
    assert_eq!(compute_streak_on(&all_false, anchor()), 0);
}

#[test]
fn test_done_today_is_at_least_one() {
    assert!(compute_streak_on(&done(&[0]), anchor()) >= 1);
    assert!(compute_streak_on(&done(&[0, 9, 30]), anchor()) >= 1);
}

#[test]
fn test_three_consecutive_days() {
    assert_eq!(compute_streak_on(&done(&[0, 1, 2]), anchor()), 3);
}

#[test]
fn test_gap_breaks_the_run() {
    assert_eq!(compute_streak_on(&done(&[0, 2]), anchor()), 1);
}

#[test]
fn test_stale_run_is_zero() {
    assert_eq!(compute_streak_on(&done(&[3]), anchor()), 0);
}

#[test]
fn test_run_ending_yesterday_counts() {
    // crosses the leap day
    assert_eq!(compute_streak_on(&done(&[1, 2, 3]), anchor()), 3);
    assert_eq!(anchor().minus_days(2).to_string(), "2024-02-29");
}

#[test]
fn test_longest_streak_looks_at_history() {
    let completions = done(&[0, 5, 6, 7, 8]);
    assert_eq!(compute_streak_on(&completions, anchor()), 1);
    assert_eq!(longest_streak(&completions), 4);
}

#[test]
fn test_double_toggle_restores_state() {
    let mut store = HabitStore::load_on(MemoryStorage::new(), anchor());
    let id = store.add_habit(NewHabit::named("Floss"));
    store.toggle_completion_on(&id, anchor(), anchor());
    store.toggle_completion_on(&id, anchor().minus_days(1), anchor());

    let before_streak = store.get_habit(&id).unwrap().streak();
    let yesterday = anchor().minus_days(1);
    let before_value = store.get_habit(&id).unwrap().completions().get(yesterday);

    assert_eq!(store.toggle_completion_on(&id, yesterday, anchor()), Some(false));
    assert_eq!(store.get_habit(&id).unwrap().streak(), 1);
    assert_eq!(store.toggle_completion_on(&id, yesterday, anchor()), Some(true));

    let habit = store.get_habit(&id).unwrap();
    assert_eq!(habit.completions().get(yesterday), before_value);
    assert_eq!(habit.streak(), before_streak);
    assert_eq!(before_streak, 2);
}

#[test]
fn test_weekly_days_do_not_affect_streak() {
    let mut store = HabitStore::load_on(MemoryStorage::new(), anchor());
    let id = store.add_habit(NewHabit {
        frequency: Frequency::weekly([chrono::Weekday::Mon]),
        ..NewHabit::named("Weekly review")
    });

    store.toggle_completion_on(&id, anchor().minus_days(2), anchor());
    store.toggle_completion_on(&id, anchor().minus_days(1), anchor());
    assert_eq!(store.get_habit(&id).unwrap().streak(), 2);
}

#[test]
fn test_streak_goes_stale_after_a_missed_day() {
    let mut store = HabitStore::load_on(MemoryStorage::new(), anchor());
    let id = store.add_habit(NewHabit::named("Journal"));
    store.toggle_completion_on(&id, anchor().minus_days(1), anchor());
    store.toggle_completion_on(&id, anchor(), anchor());
    assert_eq!(store.get_habit(&id).unwrap().streak(), 2);

    assert_eq!(store.refresh_streaks_on(anchor().plus_days(1)), 0);
    assert_eq!(store.refresh_streaks_on(anchor().plus_days(2)), 1);
    assert_eq!(store.get_habit(&id).unwrap().streak(), 0);
}

#[test]
fn test_milestones() {
    assert!(!streak::is_milestone(6));
    assert!(streak::is_milestone(streak::MILESTONE_STREAK));
}

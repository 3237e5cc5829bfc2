//! Streak calculation
//!
//! A streak is the number of consecutive completed days ending today, or
//! ending yesterday while today is still open. Everything here is a pure
//! function of a completion map, so a habit's streak can always be re-derived
//! from its history alone.

use crate::domain::{dates, Completions, DayKey};

/// Streak length at which a habit earns a milestone badge
pub const MILESTONE_STREAK: u32 = 7;

/// Current streak as of the real-world today
pub fn compute_streak(completions: &Completions) -> u32 {
    compute_streak_on(completions, dates::today())
}

/// Current streak as of the given day
///
/// The most recent completed day must be `today` or the day before, otherwise
/// the streak has lapsed and is 0. From there the walk goes backwards and
/// stops at the first gap that is not exactly one day.
pub fn compute_streak_on(completions: &Completions, today: DayKey) -> u32 {
    let mut newest_first = completions.completed_days().rev();

    let Some(mut previous) = newest_first.next() else {
        return 0;
    };

    if previous != today && previous != today.minus_days(1) {
        return 0;
    }

    let mut streak = 1;
    for day in newest_first {
        if previous.days_since(day) != 1 {
            break;
        }
        streak += 1;
        previous = day;
    }

    streak
}

/// Longest run of consecutive completed days anywhere in the history
pub fn longest_streak(completions: &Completions) -> u32 {
    let mut longest = 0;
    let mut current = 0;
    let mut last: Option<DayKey> = None;

    for day in completions.completed_days() {
        current = match last {
            Some(prev) if day.days_since(prev) == 1 => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        last = Some(day);
    }

    longest
}

/// Whether a streak is long enough for the milestone badge
pub fn is_milestone(streak: u32) -> bool {
    streak >= MILESTONE_STREAK
}

/// Get a motivational message based on a streak length
pub fn motivational_message(streak: u32) -> String {
    match streak {
        0 => "Ready to start your streak! Every journey begins with a single step.".to_string(),
        1 => "Great start! One day down, keep the momentum going.".to_string(),
        2..=6 => format!("Nice work! {} days in a row. You're building a strong habit.", streak),
        7..=13 => format!("Excellent! {} days strong. You're in the groove now!", streak),
        14..=29 => format!("Amazing! {} days straight. This is becoming second nature.", streak),
        30..=99 => format!("Incredible! {} days of consistency. You're a habit master!", streak),
        _ => format!("Legendary! {} days of unwavering commitment. You're an inspiration!", streak),
    }
}

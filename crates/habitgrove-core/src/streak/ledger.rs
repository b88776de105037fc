//! Per-habit streak ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::rewards::{milestone_bonus, RewardSchedule};
use crate::error::HabitError;

/// Streak state of one habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitRecord {
    pub name: String,
    pub streak: u32,
    /// Calendar date of the last successful check-in
    pub last_check_in: Option<NaiveDate>,
}

impl HabitRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            streak: 0,
            last_check_in: None,
        }
    }
}

/// Result of a successful check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInOutcome {
    pub habit: String,
    pub streak: u32,
    pub points_awarded: u64,
    /// Set when the new streak landed on a bonus milestone
    pub milestone: Option<u32>,
}

/// Result of a streak break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakOutcome {
    pub habit: String,
    pub previous_streak: u32,
}

/// Habit name → streak record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreakLedger {
    habits: BTreeMap<String, HabitRecord>,
}

impl StreakLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from an onboarding selection.
    pub fn with_habits<I, S>(habits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ledger = Self::new();
        for habit in habits {
            ledger.register(habit);
        }
        ledger
    }

    /// Register a habit with an empty streak. Existing habits are untouched.
    ///
    /// Returns `true` if the habit was newly added.
    pub fn register(&mut self, habit: impl Into<String>) -> bool {
        let name = habit.into();
        if self.habits.contains_key(&name) {
            return false;
        }
        self.habits.insert(name.clone(), HabitRecord::new(name));
        true
    }

    pub fn get(&self, habit: &str) -> Option<&HabitRecord> {
        self.habits.get(habit)
    }

    pub fn contains(&self, habit: &str) -> bool {
        self.habits.contains_key(habit)
    }

    pub fn records(&self) -> impl Iterator<Item = &HabitRecord> {
        self.habits.values()
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    /// Record a clean day for `habit` on `today`.
    ///
    /// # Errors
    /// `UnknownHabit` if the habit is not registered, `AlreadyCheckedInToday`
    /// if it was already checked in on `today`. Neither mutates the ledger.
    pub fn check_in(
        &mut self,
        habit: &str,
        today: NaiveDate,
        rewards: &RewardSchedule,
    ) -> Result<CheckInOutcome, HabitError> {
        let record = self
            .habits
            .get_mut(habit)
            .ok_or_else(|| HabitError::UnknownHabit(habit.to_string()))?;

        if record.last_check_in == Some(today) {
            return Err(HabitError::AlreadyCheckedInToday {
                habit: habit.to_string(),
                date: today,
            });
        }

        record.streak += 1;
        record.last_check_in = Some(today);

        let streak = record.streak;
        Ok(CheckInOutcome {
            habit: record.name.clone(),
            streak,
            points_awarded: rewards.check_in_reward(streak),
            milestone: milestone_bonus(streak).map(|_| streak),
        })
    }

    /// Reset `habit` to a zero streak with no check-in date.
    ///
    /// # Errors
    /// `UnknownHabit` if the habit is not registered.
    pub fn break_streak(&mut self, habit: &str) -> Result<BreakOutcome, HabitError> {
        let record = self
            .habits
            .get_mut(habit)
            .ok_or_else(|| HabitError::UnknownHabit(habit.to_string()))?;

        let previous_streak = record.streak;
        record.streak = 0;
        record.last_check_in = None;

        Ok(BreakOutcome {
            habit: record.name.clone(),
            previous_streak,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn day(n: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(n)
    }

    #[test]
    fn check_in_increments_and_stamps_date() {
        let rewards = RewardSchedule::default();
        let mut ledger = StreakLedger::with_habits(["Smoking"]);

        let outcome = ledger.check_in("Smoking", day(0), &rewards).unwrap();
        assert_eq!(outcome.streak, 1);
        assert_eq!(outcome.points_awarded, 10);
        assert_eq!(outcome.milestone, None);

        let record = ledger.get("Smoking").unwrap();
        assert_eq!(record.last_check_in, Some(day(0)));
    }

    #[test]
    fn second_check_in_same_day_is_rejected_without_mutation() {
        let rewards = RewardSchedule::default();
        let mut ledger = StreakLedger::with_habits(["Smoking"]);
        ledger.check_in("Smoking", day(0), &rewards).unwrap();
        let before = ledger.clone();

        let err = ledger.check_in("Smoking", day(0), &rewards).unwrap_err();
        assert!(matches!(err, HabitError::AlreadyCheckedInToday { .. }));
        assert_eq!(ledger, before);
    }

    #[test]
    fn seventh_check_in_hits_milestone() {
        let rewards = RewardSchedule::default();
        let mut ledger = StreakLedger::with_habits(["Alcohol"]);
        let total: u64 = (0..7)
            .map(|n| ledger.check_in("Alcohol", day(n), &rewards).unwrap())
            .map(|o| o.points_awarded)
            .sum();
        assert_eq!(total, 7 * 10 + 50);
        assert_eq!(ledger.get("Alcohol").unwrap().streak, 7);
    }

    #[test]
    fn break_resets_streak_and_date() {
        let rewards = RewardSchedule::default();
        let mut ledger = StreakLedger::with_habits(["Vaping"]);
        ledger.check_in("Vaping", day(0), &rewards).unwrap();
        ledger.check_in("Vaping", day(1), &rewards).unwrap();

        let outcome = ledger.break_streak("Vaping").unwrap();
        assert_eq!(outcome.previous_streak, 2);
        assert_eq!(ledger.get("Vaping").unwrap(), &HabitRecord::new("Vaping"));
    }

    #[test]
    fn unknown_habit_is_rejected() {
        let rewards = RewardSchedule::default();
        let mut ledger = StreakLedger::new();
        assert_eq!(
            ledger.check_in("Gambling", day(0), &rewards),
            Err(HabitError::UnknownHabit("Gambling".into()))
        );
        assert_eq!(
            ledger.break_streak("Gambling"),
            Err(HabitError::UnknownHabit("Gambling".into()))
        );
    }

    #[test]
    fn register_is_idempotent() {
        let rewards = RewardSchedule::default();
        let mut ledger = StreakLedger::with_habits(["Smoking"]);
        ledger.check_in("Smoking", day(0), &rewards).unwrap();
        assert!(!ledger.register("Smoking"));
        assert_eq!(ledger.get("Smoking").unwrap().streak, 1);
        assert_eq!(ledger.len(), 1);
    }

    proptest! {
        #[test]
        fn streak_counts_distinct_days(days in 1usize..120) {
            let rewards = RewardSchedule::default();
            let mut ledger = StreakLedger::with_habits(["Smoking"]);
            let mut total = 0u64;
            let mut previous_total = 0u64;
            for n in 0..days {
                total += ledger.check_in("Smoking", day(n as i64), &rewards).unwrap().points_awarded;
                prop_assert!(total > previous_total);
                previous_total = total;
            }

            let expected = days as u64 * 10
                + crate::streak::STREAK_MILESTONES
                    .iter()
                    .filter(|(len, _)| (*len as usize) <= days)
                    .map(|(_, bonus)| *bonus)
                    .sum::<u64>();
            prop_assert_eq!(ledger.get("Smoking").unwrap().streak as usize, days);
            prop_assert_eq!(total, expected);
        }
    }
}

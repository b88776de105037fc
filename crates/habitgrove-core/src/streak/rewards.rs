//! Points rewarded and deducted by streak events.

use serde::{Deserialize, Serialize};

/// Streak lengths that pay a one-time bonus, with the bonus amount.
pub const STREAK_MILESTONES: [(u32, u64); 5] =
    [(7, 50), (30, 200), (90, 500), (180, 1000), (365, 2000)];

/// Bonus paid when a check-in brings the streak to exactly `streak`.
///
/// Only the milestone equal to the new streak pays; passing a milestone
/// without landing on it pays nothing.
pub fn milestone_bonus(streak: u32) -> Option<u64> {
    STREAK_MILESTONES
        .iter()
        .find(|(length, _)| *length == streak)
        .map(|(_, bonus)| *bonus)
}

/// Largest configurable value for any single reward or penalty.
pub const MAX_REWARD: u64 = 1_000_000;

/// Point values applied by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSchedule {
    /// Points for every successful check-in
    pub check_in_base: u64,
    /// Points deducted by a streak break
    pub break_penalty: u64,
    /// Points for completing a daily activity (deducted again on un-completion)
    pub activity_reward: u64,
}

impl Default for RewardSchedule {
    fn default() -> Self {
        Self {
            check_in_base: 10,
            break_penalty: 15,
            activity_reward: 5,
        }
    }
}

impl RewardSchedule {
    /// Total points for a check-in that produced `new_streak`.
    pub fn check_in_reward(&self, new_streak: u32) -> u64 {
        self.check_in_base
            .saturating_add(milestone_bonus(new_streak).unwrap_or(0))
    }
}

/// Convert an unsigned amount into a balance delta, saturating at `i64::MAX`.
pub fn signed_amount(points: u64) -> i64 {
    i64::try_from(points).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bonus_only_on_exact_milestones() {
        assert_eq!(milestone_bonus(7), Some(50));
        assert_eq!(milestone_bonus(30), Some(200));
        assert_eq!(milestone_bonus(365), Some(2000));
        assert_eq!(milestone_bonus(8), None);
        assert_eq!(milestone_bonus(0), None);
    }

    #[test]
    fn check_in_reward_adds_base_and_bonus() {
        let schedule = RewardSchedule::default();
        assert_eq!(schedule.check_in_reward(1), 10);
        assert_eq!(schedule.check_in_reward(7), 60);
        assert_eq!(schedule.check_in_reward(90), 510);
        assert_eq!(schedule.check_in_reward(180), 1010);
    }

    #[test]
    fn oversized_amounts_saturate() {
        let schedule = RewardSchedule {
            check_in_base: u64::MAX,
            ..RewardSchedule::default()
        };
        assert_eq!(schedule.check_in_reward(7), u64::MAX);
        assert_eq!(signed_amount(u64::MAX), i64::MAX);
        assert_eq!(signed_amount(15), 15);
    }
}

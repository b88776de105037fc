//! Habit streak tracking.
//!
//! The ledger owns one [`HabitRecord`] per registered habit; the reward
//! schedule turns a new streak length into the points it earns.

mod ledger;
mod rewards;

pub use ledger::{BreakOutcome, CheckInOutcome, HabitRecord, StreakLedger};
pub use rewards::{milestone_bonus, signed_amount, RewardSchedule, MAX_REWARD, STREAK_MILESTONES};

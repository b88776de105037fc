//! Tracker events.
//!
//! Every handler returns one [`Event`]. Plant transitions are carried on the
//! event that caused them: `StreakBroken::dried` and `CheckedIn::revived_from`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Every state change in the tracker produces an Event.
/// Front ends render them; nothing in the core subscribes to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CheckedIn {
        habit: String,
        streak: u32,
        points_awarded: u64,
        balance: u64,
        /// Streak length of the milestone bonus, if one paid out
        milestone: Option<u32>,
        /// Habit whose break had dried the plant, cleared by this check-in
        revived_from: Option<String>,
        at: DateTime<Utc>,
    },
    StreakBroken {
        habit: String,
        previous_streak: u32,
        /// Points actually removed after clamping at zero
        points_deducted: u64,
        balance: u64,
        /// Whether this break dried the plant out
        dried: bool,
        at: DateTime<Utc>,
    },
    UrgeLogged {
        id: u64,
        habit: String,
        trigger: String,
        at: DateTime<Utc>,
    },
    ActivityToggled {
        activity: String,
        date: NaiveDate,
        completed: bool,
        points_delta: i64,
        balance: u64,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::CheckedIn { at, .. }
            | Event::StreakBroken { at, .. }
            | Event::UrgeLogged { at, .. }
            | Event::ActivityToggled { at, .. } => *at,
        }
    }
}

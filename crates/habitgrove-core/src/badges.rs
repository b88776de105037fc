//! Achievement badges.
//!
//! Badges are never stored: the earned set is re-evaluated from the points
//! balance and the streak ledger whenever it is asked for.

use serde::{Deserialize, Serialize};

use crate::streak::StreakLedger;

/// What it takes to earn a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BadgeRule {
    /// Balance at or above the threshold.
    PointsAtLeast(u64),
    /// Some habit's current streak at or above the length.
    AnyStreakAtLeast(u32),
    /// Defined but without an evaluable condition yet.
    NotYetEvaluable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub rule: BadgeRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeProgress {
    Earned,
    Unearned,
    NotYetEvaluable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeStatus {
    pub badge: Badge,
    pub progress: BadgeProgress,
}

pub const BADGES: [Badge; 8] = [
    Badge {
        name: "Beginner Booster",
        description: "Earn your first 50 points",
        icon: "🌱",
        rule: BadgeRule::PointsAtLeast(50),
    },
    Badge {
        name: "Habit Helper",
        description: "Reach 100 points",
        icon: "🤝",
        rule: BadgeRule::PointsAtLeast(100),
    },
    Badge {
        name: "Point Pro",
        description: "Reach 500 points",
        icon: "⭐",
        rule: BadgeRule::PointsAtLeast(500),
    },
    Badge {
        name: "Garden Guru",
        description: "Reach 1000 points",
        icon: "🌳",
        rule: BadgeRule::PointsAtLeast(1000),
    },
    Badge {
        name: "Streak Starter",
        description: "Keep any habit streak going for 7 days",
        icon: "🔥",
        rule: BadgeRule::AnyStreakAtLeast(7),
    },
    Badge {
        name: "Consistency King",
        description: "Keep any habit streak going for 30 days",
        icon: "👑",
        rule: BadgeRule::AnyStreakAtLeast(30),
    },
    Badge {
        name: "Urge Surfer",
        description: "Ride out logged urges without breaking your streak",
        icon: "🌊",
        rule: BadgeRule::NotYetEvaluable,
    },
    Badge {
        name: "Mindful Master",
        description: "Complete every daily activity for a week",
        icon: "🧘",
        rule: BadgeRule::NotYetEvaluable,
    },
];

impl BadgeRule {
    pub fn evaluate(&self, points: u64, ledger: &StreakLedger) -> BadgeProgress {
        let earned = match self {
            BadgeRule::PointsAtLeast(threshold) => points >= *threshold,
            BadgeRule::AnyStreakAtLeast(length) => ledger.records().any(|r| r.streak >= *length),
            BadgeRule::NotYetEvaluable => return BadgeProgress::NotYetEvaluable,
        };
        if earned {
            BadgeProgress::Earned
        } else {
            BadgeProgress::Unearned
        }
    }
}

/// Status of every defined badge, in definition order.
pub fn evaluate(points: u64, ledger: &StreakLedger) -> Vec<BadgeStatus> {
    BADGES
        .iter()
        .map(|badge| BadgeStatus {
            badge: badge.clone(),
            progress: badge.rule.evaluate(points, ledger),
        })
        .collect()
}

/// Only the earned badges.
pub fn earned_badges(points: u64, ledger: &StreakLedger) -> Vec<Badge> {
    evaluate(points, ledger)
        .into_iter()
        .filter(|s| s.progress == BadgeProgress::Earned)
        .map(|s| s.badge)
        .collect()
}

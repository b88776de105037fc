//! Plant growth model.
//!
//! The plant is a visual summary of the points balance. Its stage is derived
//! fresh from the balance every time, so it tracks the balance in both
//! directions. A streak break can dry the plant out; how long that lasts is
//! governed by [`DryPolicy`].
//!
//! ```text
//! seed(0) -> sprout(50) -> small(150) -> medium(300) -> mature(500)
//!     \__________ any stage --break_streak--> dry __________/
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantStage {
    Seed,
    Sprout,
    Small,
    Medium,
    Mature,
    Dry,
}

impl PlantStage {
    pub fn label(&self) -> &'static str {
        match self {
            PlantStage::Seed => "seed",
            PlantStage::Sprout => "sprout",
            PlantStage::Small => "small",
            PlantStage::Medium => "medium",
            PlantStage::Mature => "mature",
            PlantStage::Dry => "dry",
        }
    }
}

/// Cumulative point boundaries of the growth stages, ascending.
pub const STAGE_THRESHOLDS: [(PlantStage, u64); 5] = [
    (PlantStage::Seed, 0),
    (PlantStage::Sprout, 50),
    (PlantStage::Small, 150),
    (PlantStage::Medium, 300),
    (PlantStage::Mature, 500),
];

/// How long a dried-out plant stays dry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DryPolicy {
    /// Dry until the next successful check-in.
    #[default]
    UntilCheckIn,
    /// Dry for a single evaluation: the next points change after the break
    /// restores the points-derived stage.
    OneShot,
}

/// The dry flag layered over the points-derived stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dryness {
    cause: Option<String>,
}

impl Dryness {
    pub fn is_dry(&self) -> bool {
        self.cause.is_some()
    }

    /// Habit whose streak break dried the plant.
    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }

    /// Dry the plant out. Has no effect if it is already dry, so the first
    /// cause is kept. Returns `true` if the plant became dry.
    pub fn dry_out(&mut self, habit: &str) -> bool {
        if self.cause.is_some() {
            return false;
        }
        self.cause = Some(habit.to_string());
        true
    }

    /// Clear dryness unconditionally, returning the previous cause.
    pub fn revive(&mut self) -> Option<String> {
        self.cause.take()
    }

    /// Notify the flag that the balance changed for a reason other than the
    /// break that dried it. Returns the cleared cause, if any.
    pub fn on_points_changed(&mut self, policy: DryPolicy) -> Option<String> {
        match policy {
            DryPolicy::UntilCheckIn => None,
            DryPolicy::OneShot => self.revive(),
        }
    }
}

/// Derived plant view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantState {
    pub stage: PlantStage,
    /// Progress within the current stage, suppressed while dry
    pub percentage: Option<u8>,
    pub dry_cause: Option<String>,
    /// Points still needed for the next stage, `None` when mature or dry
    pub points_to_next_stage: Option<u64>,
}

impl PlantState {
    /// Derive the plant from the balance and the dry flag.
    pub fn derive(balance: u64, dryness: &Dryness) -> Self {
        if let Some(cause) = dryness.cause() {
            return Self {
                stage: PlantStage::Dry,
                percentage: None,
                dry_cause: Some(cause.to_string()),
                points_to_next_stage: None,
            };
        }

        let index = STAGE_THRESHOLDS
            .iter()
            .rposition(|(_, threshold)| *threshold <= balance)
            .unwrap_or(0);
        let (stage, current) = STAGE_THRESHOLDS[index];

        match STAGE_THRESHOLDS.get(index + 1) {
            None => Self {
                stage,
                percentage: Some(100),
                dry_cause: None,
                points_to_next_stage: None,
            },
            Some((_, next)) => {
                let span = next - current;
                let pct = ((balance - current) * 100 / span).min(100) as u8;
                Self {
                    stage,
                    percentage: Some(pct),
                    dry_cause: None,
                    points_to_next_stage: Some(next - balance),
                }
            }
        }
    }

    pub fn is_dry(&self) -> bool {
        self.stage == PlantStage::Dry
    }
}

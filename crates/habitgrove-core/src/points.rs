//! Running points balance.

use serde::{Deserialize, Serialize};

/// Single running balance, floor-clamped at zero.
///
/// Every reward and penalty in the tracker goes through [`PointsAccount::add`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointsAccount {
    balance: u64,
}

impl PointsAccount {
    pub fn new(balance: u64) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Apply a signed delta and return the new balance (never below zero).
    pub fn add(&mut self, delta: i64) -> u64 {
        self.balance = if delta >= 0 {
            self.balance.saturating_add(delta as u64)
        } else {
            self.balance.saturating_sub(delta.unsigned_abs())
        };
        self.balance
    }
}

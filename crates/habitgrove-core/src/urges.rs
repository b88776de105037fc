//! Append-only urge log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Trigger recorded when the user does not name one.
pub const UNKNOWN_TRIGGER: &str = "Unknown";

/// One logged urge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgeEvent {
    pub id: u64,
    pub habit: String,
    pub trigger: String,
    pub timestamp: DateTime<Utc>,
}

/// How often a trigger shows up in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerCount {
    pub trigger: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgeLog {
    events: Vec<UrgeEvent>,
    next_id: u64,
}

impl Default for UrgeLog {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            next_id: 1,
        }
    }
}

impl UrgeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an urge. Blank or missing triggers are stored as "Unknown".
    pub fn log(&mut self, habit: &str, trigger: Option<&str>, now: DateTime<Utc>) -> &UrgeEvent {
        let trigger = trigger
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_TRIGGER);

        let event = UrgeEvent {
            id: self.next_id,
            habit: habit.to_string(),
            trigger: trigger.to_string(),
            timestamp: now,
        };
        self.next_id += 1;
        self.events.push(event);
        &self.events[self.events.len() - 1]
    }

    /// Every urge, oldest first.
    pub fn all(&self) -> &[UrgeEvent] {
        &self.events
    }

    /// The `k` most recent urges, newest first.
    pub fn recent(&self, k: usize) -> Vec<&UrgeEvent> {
        self.events.iter().rev().take(k).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Urges per trigger, most frequent first (ties by name).
    pub fn trigger_counts(&self) -> Vec<TriggerCount> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for event in &self.events {
            *counts.entry(event.trigger.as_str()).or_default() += 1;
        }
        let mut counts: Vec<TriggerCount> = counts
            .into_iter()
            .map(|(trigger, count)| TriggerCount {
                trigger: trigger.to_string(),
                count,
            })
            .collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.trigger.cmp(&b.trigger)));
        counts
    }
}

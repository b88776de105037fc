//! Daily activity board.
//!
//! Eight fixed wellbeing activities, two per time of day. Each calendar date
//! gets its own completion map, created lazily with everything unchecked.
//! The whole board is written to a [`BoardStore`] after every mutation.

mod store;

pub use store::{BoardStore, MemoryBoardStore, BOARD_KEY};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{HabitError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    MorningMeditation,
    MorningExercise,
    AfternoonReading,
    AfternoonMindfulnessBreak,
    EveningJournaling,
    EveningGratitudePractice,
    NightReflection,
    NightDeepBreathing,
}

impl Activity {
    pub const ALL: [Activity; 8] = [
        Activity::MorningMeditation,
        Activity::MorningExercise,
        Activity::AfternoonReading,
        Activity::AfternoonMindfulnessBreak,
        Activity::EveningJournaling,
        Activity::EveningGratitudePractice,
        Activity::NightReflection,
        Activity::NightDeepBreathing,
    ];

    /// Name used as the persisted key.
    pub fn name(&self) -> &'static str {
        match self {
            Activity::MorningMeditation => "Morning Meditation",
            Activity::MorningExercise => "Morning Exercise",
            Activity::AfternoonReading => "Afternoon Reading",
            Activity::AfternoonMindfulnessBreak => "Afternoon Mindfulness Break",
            Activity::EveningJournaling => "Evening Journaling",
            Activity::EveningGratitudePractice => "Evening Gratitude Practice",
            Activity::NightReflection => "Night Reflection",
            Activity::NightDeepBreathing => "Night Deep Breathing",
        }
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        match self {
            Activity::MorningMeditation | Activity::MorningExercise => TimeOfDay::Morning,
            Activity::AfternoonReading | Activity::AfternoonMindfulnessBreak => {
                TimeOfDay::Afternoon
            }
            Activity::EveningJournaling | Activity::EveningGratitudePractice => TimeOfDay::Evening,
            Activity::NightReflection | Activity::NightDeepBreathing => TimeOfDay::Night,
        }
    }

    /// Look up an activity by its persisted name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Activity> {
        let name = name.trim();
        Activity::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(name))
    }
}

/// One row of the board as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityStatus {
    pub name: String,
    pub time_of_day: TimeOfDay,
    pub completed: bool,
}

/// Date key used by the persisted layout.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Date string → activity name → completed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyActivityBoard {
    days: BTreeMap<String, BTreeMap<String, bool>>,
}

impl DailyActivityBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate from the store, or start empty if nothing was saved.
    pub fn load(store: &dyn BoardStore) -> Result<Self> {
        Ok(store.load()?.unwrap_or_default())
    }

    fn fresh_day() -> BTreeMap<String, bool> {
        Activity::ALL
            .iter()
            .map(|a| (a.name().to_string(), false))
            .collect()
    }

    /// Make sure `today` has an entry, persisting the board if one was created.
    ///
    /// Returns `true` if the entry was created.
    pub fn ensure_today(&mut self, today: NaiveDate, store: &dyn BoardStore) -> Result<bool> {
        let key = date_key(today);
        if self.days.contains_key(&key) {
            return Ok(false);
        }

        self.days.insert(key.clone(), Self::fresh_day());
        if let Err(e) = store.save(self) {
            self.days.remove(&key);
            return Err(e);
        }
        debug!(date = %key, "created daily activity entry");
        Ok(true)
    }

    /// Flip `activity` for `today` and persist. Returns the new value.
    ///
    /// # Errors
    /// `UnknownActivity` for names outside the fixed set. A failed save rolls
    /// the flip back before the error is returned.
    pub fn toggle(&mut self, activity: &str, today: NaiveDate, store: &dyn BoardStore) -> Result<bool> {
        let activity = Activity::from_name(activity)
            .ok_or_else(|| HabitError::UnknownActivity(activity.to_string()))?;
        self.ensure_today(today, store)?;

        let key = date_key(today);
        let day = self.days.entry(key.clone()).or_insert_with(Self::fresh_day);
        let slot = day.entry(activity.name().to_string()).or_insert(false);
        *slot = !*slot;
        let completed = *slot;

        if let Err(e) = store.save(self) {
            if let Some(slot) = self
                .days
                .get_mut(&key)
                .and_then(|day| day.get_mut(activity.name()))
            {
                *slot = !completed;
            }
            return Err(e);
        }

        debug!(date = %key, activity = activity.name(), completed, "toggled activity");
        Ok(completed)
    }

    /// Completion map for `date`, if the date has been observed.
    pub fn day(&self, date: NaiveDate) -> Option<&BTreeMap<String, bool>> {
        self.days.get(&date_key(date))
    }

    pub fn is_completed(&self, activity: Activity, date: NaiveDate) -> bool {
        self.day(date)
            .and_then(|day| day.get(activity.name()))
            .copied()
            .unwrap_or(false)
    }

    pub fn completed_count(&self, date: NaiveDate) -> usize {
        self.day(date)
            .map(|day| day.values().filter(|done| **done).count())
            .unwrap_or(0)
    }

    /// The eight activities for `date` in display order.
    pub fn statuses(&self, date: NaiveDate) -> Vec<ActivityStatus> {
        Activity::ALL
            .iter()
            .map(|a| ActivityStatus {
                name: a.name().to_string(),
                time_of_day: a.time_of_day(),
                completed: self.is_completed(*a, date),
            })
            .collect()
    }

    /// Statuses for `date` grouped by time of day.
    pub fn by_time_of_day(&self, date: NaiveDate) -> BTreeMap<TimeOfDay, Vec<ActivityStatus>> {
        let mut groups: BTreeMap<TimeOfDay, Vec<ActivityStatus>> = BTreeMap::new();
        for status in self.statuses(date) {
            groups.entry(status.time_of_day).or_default().push(status);
        }
        groups
    }

    /// Number of dates recorded on the board.
    pub fn days_recorded(&self) -> usize {
        self.days.len()
    }
}

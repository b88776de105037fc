//! Tracker: the owner of all habit state.
//!
//! Front ends build one [`Tracker`] per session and call its handlers in
//! response to user actions. Each handler is run-to-completion and
//! all-or-nothing: a handler that returns an error has changed nothing.
//! Plant and badge state are plain functions of the current state and are
//! recomputed on demand through [`Tracker::plant`] and [`Tracker::badges`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::activities::{ActivityStatus, BoardStore, DailyActivityBoard};
use crate::badges::{self, BadgeStatus};
use crate::clock::Clock;
use crate::error::Result;
use crate::events::Event;
use crate::plant::{DryPolicy, Dryness, PlantState};
use crate::points::PointsAccount;
use crate::storage::Config;
use crate::streak::{signed_amount, HabitRecord, RewardSchedule, StreakLedger};
use crate::urges::{UrgeEvent, UrgeLog};

/// Everything a session holds apart from the persisted activity board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub ledger: StreakLedger,
    pub points: PointsAccount,
    pub dryness: Dryness,
    pub urges: UrgeLog,
}

impl SessionState {
    /// Fresh session for an onboarding habit selection.
    pub fn with_habits<I, S>(habits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ledger: StreakLedger::with_habits(habits),
            ..Self::default()
        }
    }
}

/// Rules the tracker applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerSettings {
    pub rewards: RewardSchedule,
    pub dry_policy: DryPolicy,
}

impl TrackerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            rewards: config.reward_schedule(),
            dry_policy: config.plant.dry_policy,
        }
    }
}

/// Serializable view of the whole tracker for display.
#[derive(Debug, Clone, Serialize)]
pub struct TrackerSnapshot {
    pub date: NaiveDate,
    pub points: u64,
    pub plant: PlantState,
    pub habits: Vec<HabitRecord>,
    pub badges: Vec<BadgeStatus>,
    pub activities: Vec<ActivityStatus>,
    pub activities_completed: usize,
    pub recent_urges: Vec<UrgeEvent>,
}

pub struct Tracker {
    state: SessionState,
    board: DailyActivityBoard,
    store: Box<dyn BoardStore>,
    clock: Box<dyn Clock>,
    settings: TrackerSettings,
}

impl Tracker {
    /// Build a tracker around `state`, rehydrating the activity board from
    /// `store` and making sure today has an entry.
    ///
    /// # Errors
    /// Returns an error if the saved board cannot be read or today's entry
    /// cannot be written.
    pub fn new(
        state: SessionState,
        store: Box<dyn BoardStore>,
        clock: Box<dyn Clock>,
        settings: TrackerSettings,
    ) -> Result<Self> {
        let board = DailyActivityBoard::load(store.as_ref())?;
        let mut tracker = Self {
            state,
            board,
            store,
            clock,
            settings,
        };
        tracker.ensure_today()?;
        Ok(tracker)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn into_state(self) -> SessionState {
        self.state
    }

    pub fn settings(&self) -> TrackerSettings {
        self.settings
    }

    pub fn ledger(&self) -> &StreakLedger {
        &self.state.ledger
    }

    pub fn points(&self) -> u64 {
        self.state.points.balance()
    }

    pub fn urges(&self) -> &UrgeLog {
        &self.state.urges
    }

    pub fn board(&self) -> &DailyActivityBoard {
        &self.board
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Create today's activity entry if the date rolled over.
    pub fn ensure_today(&mut self) -> Result<bool> {
        let today = self.clock.today();
        self.board.ensure_today(today, self.store.as_ref())
    }

    /// Register an extra habit mid-session.
    pub fn register_habit(&mut self, habit: &str) -> bool {
        self.state.ledger.register(habit)
    }

    /// Apply a points delta, letting the dry flag react to a real change.
    fn apply_points(&mut self, delta: i64) -> u64 {
        let before = self.state.points.balance();
        let after = self.state.points.add(delta);
        if after != before {
            if let Some(cause) = self.state.dryness.on_points_changed(self.settings.dry_policy) {
                debug!(habit = %cause, "plant recovered on points change");
            }
        }
        after
    }

    /// Record a clean day for `habit`.
    ///
    /// # Errors
    /// `AlreadyCheckedInToday` or `UnknownHabit`; neither changes any state.
    pub fn check_in(&mut self, habit: &str) -> Result<Event> {
        let today = self.clock.today();
        let outcome = self
            .state
            .ledger
            .check_in(habit, today, &self.settings.rewards)?;

        let revived_from = self.state.dryness.revive();
        let balance = self.state.points.add(signed_amount(outcome.points_awarded));

        if let Some(milestone) = outcome.milestone {
            info!(habit = %outcome.habit, streak = milestone, "streak milestone reached");
        }
        if let Some(cause) = &revived_from {
            info!(habit = %cause, "plant revived by check-in");
        }
        debug!(
            habit = %outcome.habit,
            streak = outcome.streak,
            awarded = outcome.points_awarded,
            balance,
            "checked in"
        );

        Ok(Event::CheckedIn {
            habit: outcome.habit,
            streak: outcome.streak,
            points_awarded: outcome.points_awarded,
            balance,
            milestone: outcome.milestone,
            revived_from,
            at: self.clock.now(),
        })
    }

    /// Record that `habit` happened, resetting its streak.
    ///
    /// A break on a live streak dries the plant unless it is already dry.
    ///
    /// # Errors
    /// `UnknownHabit`, without changing any state.
    pub fn break_streak(&mut self, habit: &str) -> Result<Event> {
        let outcome = self.state.ledger.break_streak(habit)?;

        let before = self.state.points.balance();
        let balance = self.apply_points(-signed_amount(self.settings.rewards.break_penalty));

        let dried = outcome.previous_streak > 0 && self.state.dryness.dry_out(&outcome.habit);
        if dried {
            info!(habit = %outcome.habit, streak = outcome.previous_streak, "plant dried out");
        }
        debug!(habit = %outcome.habit, balance, "streak broken");

        Ok(Event::StreakBroken {
            habit: outcome.habit,
            previous_streak: outcome.previous_streak,
            points_deducted: before.saturating_sub(balance),
            balance,
            dried,
            at: self.clock.now(),
        })
    }

    /// Append an urge to the log. Trigger defaults to "Unknown".
    pub fn log_urge(&mut self, habit: &str, trigger: Option<&str>) -> Event {
        let event = self.state.urges.log(habit, trigger, self.clock.now());
        debug!(id = event.id, habit = %event.habit, trigger = %event.trigger, "urge logged");
        Event::UrgeLogged {
            id: event.id,
            habit: event.habit.clone(),
            trigger: event.trigger.clone(),
            at: event.timestamp,
        }
    }

    /// Flip today's completion of `activity`, crediting or debiting points.
    ///
    /// # Errors
    /// `UnknownActivity`, or a storage error. In both cases neither the board
    /// nor the balance move.
    pub fn toggle_activity(&mut self, activity: &str) -> Result<Event> {
        let today = self.clock.today();
        let completed = self.board.toggle(activity, today, self.store.as_ref())?;

        let reward = signed_amount(self.settings.rewards.activity_reward);
        let before = self.state.points.balance();
        let balance = self.apply_points(if completed { reward } else { -reward });

        let name = crate::activities::Activity::from_name(activity)
            .map(|a| a.name().to_string())
            .unwrap_or_else(|| activity.to_string());

        Ok(Event::ActivityToggled {
            activity: name,
            date: today,
            completed,
            points_delta: signed_amount(balance) - signed_amount(before),
            balance,
            at: self.clock.now(),
        })
    }

    pub fn plant(&self) -> PlantState {
        PlantState::derive(self.state.points.balance(), &self.state.dryness)
    }

    pub fn badges(&self) -> Vec<BadgeStatus> {
        badges::evaluate(self.state.points.balance(), &self.state.ledger)
    }

    pub fn activities_today(&self) -> Vec<ActivityStatus> {
        self.board.statuses(self.clock.today())
    }

    pub fn snapshot(&self, recent_urges: usize) -> TrackerSnapshot {
        let today = self.clock.today();
        TrackerSnapshot {
            date: today,
            points: self.points(),
            plant: self.plant(),
            habits: self.state.ledger.records().cloned().collect(),
            badges: self.badges(),
            activities: self.board.statuses(today),
            activities_completed: self.board.completed_count(today),
            recent_urges: self
                .state
                .urges
                .recent(recent_urges)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

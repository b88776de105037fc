//! # HabitGrove Core Library
//!
//! This library provides the core logic of HabitGrove, a habit-breaking
//! companion. Front ends (the CLI in this workspace) own a [`Tracker`] and
//! feed it user actions; everything else is derived.
//!
//! ## Architecture
//!
//! - **Streak ledger**: per-habit streaks with a once-per-day check-in rule
//! - **Points**: a single clamped balance fed by check-ins, activities and penalties
//! - **Plant**: growth stage derived from points, dried out by streak breaks
//! - **Badges**: achievements re-evaluated from points and streaks
//! - **Activities**: eight daily wellbeing activities, persisted per date
//! - **Urges**: append-only log of urges and their triggers
//! - **Storage**: SQLite key-value slots and TOML configuration
//! - **Completion**: client for the generative-text coach
//!
//! ## Key Components
//!
//! - [`Tracker`]: state owner and event handlers
//! - [`PlantState`]: derived plant view
//! - [`Database`]: key-value persistence
//! - [`Config`]: application configuration management

pub mod activities;
pub mod badges;
pub mod clock;
pub mod completion;
pub mod error;
pub mod events;
pub mod plant;
pub mod points;
pub mod storage;
pub mod streak;
pub mod tracker;
pub mod urges;

pub use activities::{Activity, ActivityStatus, BoardStore, DailyActivityBoard, MemoryBoardStore, TimeOfDay};
pub use badges::{Badge, BadgeProgress, BadgeRule, BadgeStatus};
pub use clock::{Clock, FixedClock, SystemClock};
pub use completion::{complete_or_fallback, HttpCompletionClient, TextCompletion};
pub use error::{CompletionError, ConfigError, CoreError, DatabaseError, HabitError};
pub use events::Event;
pub use plant::{DryPolicy, Dryness, PlantStage, PlantState};
pub use points::PointsAccount;
pub use storage::{Config, Database};
pub use streak::{HabitRecord, RewardSchedule, StreakLedger};
pub use tracker::{SessionState, Tracker, TrackerSettings, TrackerSnapshot};
pub use urges::{UrgeEvent, UrgeLog};

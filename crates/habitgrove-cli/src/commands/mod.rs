//! Subcommand implementations.
//!
//! Every invocation rebuilds the tracker from the database: the activity
//! board from its own slot and the rest of the session from [`SESSION_KEY`].

pub mod activity;
pub mod coach;
pub mod config;
pub mod garden;
pub mod habit;
pub mod session;
pub mod urge;

use std::error::Error;
use std::rc::Rc;

use habitgrove_core::{Config, Database, SessionState, SystemClock, Tracker, TrackerSettings};
use serde::Serialize;

pub const SESSION_KEY: &str = "session";

pub type CmdResult = Result<(), Box<dyn Error>>;

/// A tracker plus the handles needed to write its session back.
pub struct Session {
    pub db: Rc<Database>,
    pub config: Config,
    pub tracker: Tracker,
}

impl Session {
    /// Open the saved session, or a fresh one with the configured habits.
    pub fn open() -> Result<Self, Box<dyn Error>> {
        let config = Config::load()?;
        let db = Rc::new(Database::open()?);
        let state = match db.kv_get(SESSION_KEY)? {
            Some(json) => serde_json::from_str::<SessionState>(&json)
                .map_err(|e| format!("saved session is unreadable ({e}); run `habitgrove session end`"))?,
            None => SessionState::with_habits(config.session.habits.iter().cloned()),
        };
        Self::with_state(db, config, state)
    }

    pub fn with_state(
        db: Rc<Database>,
        config: Config,
        state: SessionState,
    ) -> Result<Self, Box<dyn Error>> {
        let tracker = Tracker::new(
            state,
            Box::new(db.clone()),
            Box::new(SystemClock),
            TrackerSettings::from_config(&config),
        )?;
        Ok(Self { db, config, tracker })
    }

    pub fn save(&self) -> CmdResult {
        let json = serde_json::to_string(self.tracker.state())?;
        self.db.kv_set(SESSION_KEY, &json)?;
        Ok(())
    }
}

pub fn print_json<T: Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

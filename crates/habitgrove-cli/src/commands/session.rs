use clap::Subcommand;
use std::rc::Rc;

use habitgrove_core::{Config, Database, SessionState};

use super::{print_json, CmdResult, Session, SESSION_KEY};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Start a fresh session, replacing any current one
    Start {
        /// Habit to track (repeatable); defaults to session.habits from config
        #[arg(long = "habit")]
        habits: Vec<String>,
    },
    /// Print the full session snapshot as JSON
    Status,
    /// Discard the current session (the activity board is kept)
    End,
}

pub fn run(action: SessionAction) -> CmdResult {
    match action {
        SessionAction::Start { habits } => {
            let config = Config::load()?;
            let habits: Vec<String> = if habits.is_empty() {
                config.session.habits.clone()
            } else {
                habits
            };
            let habits: Vec<String> = habits
                .into_iter()
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .collect();
            if habits.is_empty() {
                return Err("a session needs at least one habit".into());
            }

            let db = Rc::new(Database::open()?);
            let recent = config.session.recent_urges;
            let session = Session::with_state(db, config, SessionState::with_habits(habits))?;
            session.save()?;
            print_json(&session.tracker.snapshot(recent))?;
        }
        SessionAction::Status => {
            let session = Session::open()?;
            print_json(&session.tracker.snapshot(session.config.session.recent_urges))?;
        }
        SessionAction::End => {
            let db = Database::open()?;
            let removed = db.kv_delete(SESSION_KEY)?;
            print_json(&serde_json::json!({ "ended": removed }))?;
        }
    }
    Ok(())
}

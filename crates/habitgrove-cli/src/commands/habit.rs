use clap::Subcommand;

use habitgrove_core::CoreError;

use super::{print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum HabitAction {
    /// List tracked habits and their streaks
    List,
    /// Check in a clean day for a habit
    CheckIn {
        /// Habit name
        habit: String,
    },
    /// Record that a habit happened, resetting its streak
    Break {
        /// Habit name
        habit: String,
    },
    /// Start tracking another habit in the current session
    Add {
        /// Habit name
        habit: String,
    },
}

pub fn run(action: HabitAction) -> CmdResult {
    let mut session = Session::open()?;

    match action {
        HabitAction::List => {
            let habits: Vec<_> = session.tracker.ledger().records().cloned().collect();
            print_json(&habits)?;
            return Ok(());
        }
        HabitAction::CheckIn { habit } => match session.tracker.check_in(&habit) {
            Ok(event) => print_json(&event)?,
            Err(CoreError::Habit(e)) if e.is_informational() => {
                println!("{e}");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        },
        HabitAction::Break { habit } => {
            let event = session.tracker.break_streak(&habit)?;
            print_json(&event)?;
        }
        HabitAction::Add { habit } => {
            let habit = habit.trim();
            if habit.is_empty() {
                return Err("habit name cannot be empty".into());
            }
            let added = session.tracker.register_habit(habit);
            print_json(&serde_json::json!({ "habit": habit, "added": added }))?;
        }
    }

    session.save()
}

use clap::Subcommand;

use super::{print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum ActivityAction {
    /// Today's activities
    List {
        /// Group by time of day
        #[arg(long)]
        grouped: bool,
    },
    /// Mark an activity done (or undo it)
    Toggle {
        /// Activity name, e.g. "Morning Meditation"
        name: String,
    },
}

pub fn run(action: ActivityAction) -> CmdResult {
    let mut session = Session::open()?;

    match action {
        ActivityAction::List { grouped } => {
            if grouped {
                let today = session.tracker.today();
                print_json(&session.tracker.board().by_time_of_day(today))?;
            } else {
                print_json(&session.tracker.activities_today())?;
            }
        }
        ActivityAction::Toggle { name } => {
            let event = session.tracker.toggle_activity(&name)?;
            print_json(&event)?;
            session.save()?;
        }
    }
    Ok(())
}

use clap::Subcommand;

use super::{print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum UrgeAction {
    /// Log an urge
    Log {
        /// Habit the urge relates to
        habit: String,
        /// What set it off
        #[arg(long)]
        trigger: Option<String>,
    },
    /// List recent urges, newest first
    List {
        /// How many to show (defaults to session.recent_urges)
        #[arg(long)]
        last: Option<usize>,
        /// Show every urge
        #[arg(long, conflicts_with = "last")]
        all: bool,
    },
    /// Urge counts per trigger
    Triggers,
}

pub fn run(action: UrgeAction) -> CmdResult {
    let mut session = Session::open()?;

    match action {
        UrgeAction::Log { habit, trigger } => {
            let event = session.tracker.log_urge(&habit, trigger.as_deref());
            print_json(&event)?;
            session.save()?;
        }
        UrgeAction::List { last, all } => {
            let urges = session.tracker.urges();
            if all {
                print_json(&urges.all())?;
            } else {
                let k = last.unwrap_or(session.config.session.recent_urges);
                print_json(&urges.recent(k))?;
            }
        }
        UrgeAction::Triggers => {
            print_json(&session.tracker.urges().trigger_counts())?;
        }
    }
    Ok(())
}

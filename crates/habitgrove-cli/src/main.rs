use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "habitgrove", version, about = "HabitGrove CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Session lifecycle
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Habit check-ins and streak breaks
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Urge log
    Urge {
        #[command(subcommand)]
        action: commands::urge::UrgeAction,
    },
    /// Daily activity board
    Activity {
        #[command(subcommand)]
        action: commands::activity::ActivityAction,
    },
    /// Show the plant
    Plant,
    /// Show badges
    Badges {
        /// Only earned badges
        #[arg(long)]
        earned: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Ask the coach
    Coach {
        #[command(subcommand)]
        action: commands::coach::CoachAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("HABITGROVE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Session { action } => commands::session::run(action),
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Urge { action } => commands::urge::run(action),
        Commands::Activity { action } => commands::activity::run(action),
        Commands::Plant => commands::garden::run_plant(),
        Commands::Badges { earned } => commands::garden::run_badges(earned),
        Commands::Config { action } => commands::config::run(action),
        Commands::Coach { action } => commands::coach::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "habitgrove", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

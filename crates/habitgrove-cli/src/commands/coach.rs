use clap::Subcommand;
use serde::Serialize;
use tracing::warn;

use habitgrove_core::completion::{
    complete_or_fallback, mindset_prompt, urge_support_prompt, FALLBACK_MESSAGE,
};
use habitgrove_core::{Config, HttpCompletionClient};

use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum CoachAction {
    /// Get help riding out an urge
    Urge {
        /// Habit the urge relates to
        habit: String,
        /// What set it off
        #[arg(long)]
        trigger: Option<String>,
    },
    /// Ask the mindset coach a question
    Ask {
        /// The question
        question: String,
    },
}

#[derive(Serialize)]
struct CoachReply {
    prompt: String,
    reply: String,
}

fn ask(config: &Config, prompt: String) -> Result<CoachReply, Box<dyn std::error::Error>> {
    let client = match HttpCompletionClient::from_config(&config.completion) {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "coach unavailable");
            return Ok(CoachReply {
                prompt,
                reply: FALLBACK_MESSAGE.to_string(),
            });
        }
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let reply = runtime.block_on(complete_or_fallback(&client, &prompt));
    Ok(CoachReply { prompt, reply })
}

pub fn run(action: CoachAction) -> CmdResult {
    let config = Config::load()?;
    let prompt = match action {
        CoachAction::Urge { habit, trigger } => urge_support_prompt(&habit, trigger.as_deref()),
        CoachAction::Ask { question } => mindset_prompt(&question),
    };
    print_json(&ask(&config, prompt)?)
}

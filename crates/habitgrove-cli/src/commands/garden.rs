//! Read-only views derived from the session.

use habitgrove_core::BadgeProgress;

use super::{print_json, CmdResult, Session};

pub fn run_plant() -> CmdResult {
    let session = Session::open()?;
    print_json(&session.tracker.plant())
}

pub fn run_badges(earned_only: bool) -> CmdResult {
    let session = Session::open()?;
    let badges: Vec<_> = session
        .tracker
        .badges()
        .into_iter()
        .filter(|s| !earned_only || s.progress == BadgeProgress::Earned)
        .collect();
    print_json(&badges)
}

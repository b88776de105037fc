//! Integration tests for the tracker over on-disk storage.

use chrono::NaiveDate;
use habitgrove_core::{
    Activity, BoardStore, Database, DryPolicy, Event, FixedClock, PlantStage, SessionState,
    Tracker, TrackerSettings,
};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 10).unwrap()
}

fn open_tracker(path: &std::path::Path, state: SessionState, clock: &FixedClock) -> Tracker {
    let db = Database::open_at(path).unwrap();
    Tracker::new(
        state,
        Box::new(db),
        Box::new(clock.clone()),
        TrackerSettings::default(),
    )
    .unwrap()
}

#[test]
fn activity_board_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habitgrove.db");
    let clock = FixedClock::on(date());

    let mut tracker = open_tracker(&path, SessionState::with_habits(["Smoking"]), &clock);
    tracker.toggle_activity("Morning Meditation").unwrap();
    tracker.toggle_activity("Night Deep Breathing").unwrap();
    let before = tracker.board().day(date()).cloned();
    drop(tracker);

    let tracker = open_tracker(&path, SessionState::default(), &clock);
    assert_eq!(tracker.board().day(date()).cloned(), before);
    assert!(tracker.board().is_completed(Activity::NightDeepBreathing, date()));
    // points are session state and do not come back with the board
    assert_eq!(tracker.points(), 0);
}

#[test]
fn startup_creates_and_persists_today() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habitgrove.db");
    let clock = FixedClock::on(date());

    drop(open_tracker(&path, SessionState::default(), &clock));

    let db = Database::open_at(&path).unwrap();
    let board = BoardStore::load(&db).unwrap().unwrap();
    let today = board.day(date()).unwrap();
    assert_eq!(today.len(), 8);
    assert!(today.values().all(|done| !done));
}

#[test]
fn session_state_carries_across_trackers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habitgrove.db");
    let clock = FixedClock::on(date());

    let mut tracker = open_tracker(&path, SessionState::with_habits(["Alcohol"]), &clock);
    for _ in 0..7 {
        tracker.check_in("Alcohol").unwrap();
        clock.advance_days(1);
    }
    tracker.log_urge("Alcohol", Some("Friday night"));
    let json = serde_json::to_string(tracker.state()).unwrap();
    drop(tracker);

    let state: SessionState = serde_json::from_str(&json).unwrap();
    let mut tracker = open_tracker(&path, state, &clock);
    assert_eq!(tracker.points(), 120);
    assert_eq!(tracker.urges().all()[0].trigger, "Friday night");

    let event = tracker.log_urge("Alcohol", None);
    assert!(matches!(event, Event::UrgeLogged { id: 2, .. }));
}

#[test]
fn full_day_walkthrough() {
    let store = habitgrove_core::MemoryBoardStore::new();
    let clock = FixedClock::on(date());
    let mut tracker = Tracker::new(
        SessionState::with_habits(["Smoking", "Social Media"]),
        Box::new(store.clone()),
        Box::new(clock.clone()),
        TrackerSettings {
            dry_policy: DryPolicy::UntilCheckIn,
            ..TrackerSettings::default()
        },
    )
    .unwrap();

    for _ in 0..30 {
        tracker.check_in("Smoking").unwrap();
        clock.advance_days(1);
    }
    // 30 * 10 + 50 + 200
    assert_eq!(tracker.points(), 550);
    assert_eq!(tracker.plant().stage, PlantStage::Mature);

    let names: Vec<_> = tracker
        .badges()
        .into_iter()
        .filter(|s| s.progress == habitgrove_core::BadgeProgress::Earned)
        .map(|s| s.badge.name)
        .collect();
    assert_eq!(
        names,
        vec![
            "Beginner Booster",
            "Habit Helper",
            "Point Pro",
            "Streak Starter",
            "Consistency King"
        ]
    );

    tracker.break_streak("Smoking").unwrap();
    assert_eq!(tracker.points(), 535);
    assert_eq!(tracker.plant().stage, PlantStage::Dry);
    let king = tracker
        .badges()
        .into_iter()
        .find(|s| s.badge.name == "Consistency King")
        .unwrap();
    assert_eq!(king.progress, habitgrove_core::BadgeProgress::Unearned);

    for activity in Activity::ALL {
        tracker.toggle_activity(activity.name()).unwrap();
    }
    assert_eq!(tracker.points(), 575);
    assert_eq!(tracker.plant().stage, PlantStage::Dry);

    tracker.check_in("Social Media").unwrap();
    let plant = tracker.plant();
    assert_eq!(plant.stage, PlantStage::Mature);
    assert_eq!(plant.percentage, Some(100));
}

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tempfile::TempDir;

use keyladder::app::Session;
use keyladder::config::Config;
use keyladder::engine::progression::Thresholds;
use keyladder::engine::stage::Stage;
use keyladder::feedback::{FALLBACK_FEEDBACK, StaticFeedback};
use keyladder::keyboard::keymap::LanguageMode;
use keyladder::session::attempt::AttemptState;
use keyladder::session::input::{KeyInput, KeyOutcome, NamedKey};
use keyladder::store::ProgressStore;
use keyladder::store::json_store::JsonStore;

fn config(user: &str) -> Config {
    Config {
        user_id: user.to_string(),
        display_name: user.to_string(),
        target_wpm: 0,
        target_accuracy: 90,
        ..Config::default()
    }
}

fn session_in(dir: &TempDir, config: Config, seed: u64) -> Session {
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    Session::with_collaborators(
        config,
        Some(Box::new(store)),
        Box::new(StaticFeedback),
        SmallRng::seed_from_u64(seed),
    )
}

/// Types the whole lesson through the keys the hints name.
fn type_lesson(session: &mut Session, t0: Instant) -> KeyOutcome {
    let mut now = t0;
    let mut last = KeyOutcome::Ignored;
    while session.attempt_state() != AttemptState::Completed {
        let Some(hint) = session.next_hint() else {
            break;
        };
        let mut input = KeyInput::char(hint.key);
        input.shift = hint.shift;
        now += Duration::from_millis(150);
        last = session.handle_key(&input, now);
        if matches!(last, KeyOutcome::Completed(_)) {
            break;
        }
    }
    last
}

#[test]
fn clearing_levels_persists_progress() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, config("ada"), 1);
    let t0 = Instant::now();

    for expected_level in 2..=4 {
        let outcome = type_lesson(&mut session, t0);
        assert!(matches!(outcome, KeyOutcome::Completed(_)));
        assert_eq!(session.level, expected_level);
    }
    assert_eq!(session.status_line, "Level 3 Cleared! Progress Saved.");
    assert_eq!(session.coach_line.as_deref(), Some(FALLBACK_FEEDBACK));

    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    let profile = store.fetch_profile("ada").unwrap().unwrap();
    assert_eq!(profile.current_level, 4);
    assert!(profile.best_wpm > 0);
    assert_eq!(profile.best_accuracy, 100);

    let resumed = session_in(&dir, config("ada"), 2);
    assert_eq!(resumed.level, 4);
}

#[test]
fn alternate_mode_lessons_are_typable_end_to_end() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, config("nepali"), 3);
    session.set_language(LanguageMode::Alternate);
    for level in [1, 30, 60, 90, 110, 160, 210] {
        session.select_level(level);
        let stage = session.stage();
        let outcome = type_lesson(&mut session, Instant::now());
        assert!(
            matches!(outcome, KeyOutcome::Completed(s) if s.accuracy == 100),
            "level {level} ({stage}) could not be completed"
        );
    }
}

#[test]
fn mistakes_and_ignored_keys() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, config("bob"), 4);
    let t0 = Instant::now();

    assert_eq!(
        session.handle_key(&KeyInput::named(NamedKey::Backspace), t0),
        KeyOutcome::Ignored
    );
    assert_eq!(
        session.handle_key(&KeyInput::char('a').with_ctrl(), t0),
        KeyOutcome::Ignored
    );
    assert_eq!(session.attempt_state(), AttemptState::Idle);

    // level 1 opens with "aaaa"
    let outcome = session.handle_key(&KeyInput::char('j'), t0);
    assert!(matches!(outcome, KeyOutcome::Incorrect { .. }));
    assert_eq!(session.attempt_state(), AttemptState::Active);
    assert_eq!(session.attempt.cursor(), 0);
    assert_eq!(session.live.accuracy, 0);

    session.handle_key(&KeyInput::char('a'), t0 + Duration::from_millis(200));
    assert_eq!(session.attempt.cursor(), 1);
    assert_eq!(session.live.accuracy, 50);

    session.restart();
    assert_eq!(session.attempt_state(), AttemptState::Idle);
    assert_eq!(session.live.accuracy, 100);
}

#[test]
fn roadmap_and_leaderboard() {
    let dir = TempDir::new().unwrap();
    let mut ada = session_in(&dir, config("ada"), 5);
    ada.select_level(120);
    assert_eq!(ada.stage(), Stage::WordMastery);

    let mut bob = session_in(&dir, config("bob"), 6);
    bob.select_level(40);
    bob.set_thresholds(Thresholds::new(20, 95));

    bob.refresh_leaderboard();
    let names: Vec<&str> = bob
        .leaderboard
        .iter()
        .map(|e| e.display_name.as_str())
        .collect();
    assert_eq!(names, vec!["ada", "bob"]);
    assert_eq!(bob.leaderboard[0].level, 120);

    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    let profile = store.fetch_profile("bob").unwrap().unwrap();
    assert_eq!(profile.thresholds(), Thresholds::new(20, 95));
}

#[test]
fn history_mistake_drill_and_reset() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, config("kim"), 4);
    let t0 = Instant::now();

    // one miss on the first key, then a clean finish: 99% passes the 90% target
    let expected = session.lesson.glyph(0).unwrap().to_string();
    session.handle_key(&KeyInput::char('z'), t0);
    type_lesson(&mut session, t0);
    assert_eq!(session.level, 2);
    assert!(session.last_heatmap.contains(&expected));

    assert!(session.start_mistake_drill());
    let outcome = type_lesson(&mut session, t0);
    assert!(matches!(outcome, KeyOutcome::Completed(_)));
    assert_eq!(session.level, 2);

    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    let history = store.fetch_history("kim", 10).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].level, 1);
    assert!(history[0].confusion_summary().contains("'z'"));

    let mut resumed = session_in(&dir, config("kim"), 5);
    resumed.go_to_history();
    assert_eq!(resumed.history.len(), 1);
    resumed.request_reset();
    resumed.confirm_reset();
    assert_eq!(resumed.level, 1);

    assert!(store.fetch_history("kim", 10).unwrap().is_empty());
    let profile = store.fetch_profile("kim").unwrap().unwrap();
    assert_eq!(profile.current_level, 1);
    assert_eq!(profile.best_wpm, 0);
    assert_eq!(session_in(&dir, config("kim"), 6).level, 1);
}

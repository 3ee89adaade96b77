use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Instant;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::engine::progression::{Thresholds, advance_or_repeat, evaluate_completion};
use crate::engine::stage::Stage;
use crate::feedback::{FALLBACK_FEEDBACK, FeedbackSource, StaticFeedback, feedback_or_fallback};
use crate::generator::LessonGenerator;
use crate::keyboard::keymap::{KeyHint, Keymap, LanguageMode};
use crate::session::attempt::{Attempt, AttemptState};
use crate::session::input::{KeyInput, KeyOutcome, process_key};
use crate::session::lesson::Lesson;
use crate::session::result::AttemptResult;
use crate::session::stats::{StatsSnapshot, derive_stats};
use crate::store::json_store::JsonStore;
use crate::store::schema::{LeaderboardEntry, Profile};
use crate::store::{ProgressStore, ProgressUpdate};

pub const READY_LINE: &str = "Ready to flow? Start typing!";
pub const RESET_LINE: &str = "Progress reset. Back to Level 1.";
pub const NO_MISTAKES_LINE: &str = "No mistakes to drill. Clean run!";
pub const LEADERBOARD_SIZE: usize = 10;
pub const HISTORY_SIZE: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Drill,
    Roadmap,
    Leaderboard,
    History,
}

/// What the current lesson is for. Only level lessons move the curriculum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrillKind {
    Level,
    Mistakes,
}

/// Everything one learner's practice run needs: curriculum position, the
/// current lesson and attempt, and the collaborators progress flows out to.
pub struct Session {
    pub config: Config,
    pub screen: AppScreen,
    pub level: u32,
    pub mode: LanguageMode,
    pub thresholds: Thresholds,
    pub lesson: Lesson,
    pub drill_kind: DrillKind,
    pub attempt: Attempt,
    pub keymap: Keymap,
    pub live: StatsSnapshot,
    pub status_line: String,
    pub coach_line: Option<String>,
    pub last_result: Option<AttemptResult>,
    pub last_heatmap: BTreeSet<String>,
    pub last_outcome: Option<KeyOutcome>,
    pub roadmap_selected: u32,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub history: Vec<AttemptResult>,
    pub reset_armed: bool,
    pub should_quit: bool,
    store: Option<Box<dyn ProgressStore>>,
    feedback: Arc<dyn FeedbackSource>,
    feedback_tx: Sender<(u64, String)>,
    feedback_rx: Receiver<(u64, String)>,
    feedback_seq: u64,
    generator: LessonGenerator,
    rng: SmallRng,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let store: Option<Box<dyn ProgressStore>> = match JsonStore::new() {
            Ok(store) => Some(Box::new(store)),
            Err(e) => {
                warn!("progress store unavailable, running offline: {e}");
                None
            }
        };
        let feedback = feedback_source(&config);
        Self::with_collaborators(config, store, feedback, SmallRng::from_entropy())
    }

    pub fn with_collaborators(
        mut config: Config,
        store: Option<Box<dyn ProgressStore>>,
        feedback: Box<dyn FeedbackSource>,
        mut rng: SmallRng,
    ) -> Self {
        config.normalize();
        let (feedback_tx, feedback_rx) = mpsc::channel();
        let mode = config.language_mode();
        let thresholds = config.thresholds();
        let generator = LessonGenerator::new(config.drill_length);
        let lesson = generator.generate(1, mode, &mut rng);
        let mut session = Self {
            screen: AppScreen::Drill,
            level: 1,
            mode,
            thresholds,
            lesson,
            drill_kind: DrillKind::Level,
            attempt: Attempt::new(),
            keymap: Keymap::for_mode(mode),
            live: StatsSnapshot::idle(),
            status_line: READY_LINE.to_string(),
            coach_line: None,
            last_result: None,
            last_heatmap: BTreeSet::new(),
            last_outcome: None,
            roadmap_selected: 1,
            leaderboard: Vec::new(),
            history: Vec::new(),
            reset_armed: false,
            should_quit: false,
            store,
            feedback: Arc::from(feedback),
            feedback_tx,
            feedback_rx,
            feedback_seq: 0,
            generator,
            rng,
            config,
        };
        session.sync_profile();
        session
    }

    /// Adopt the stored level and targets, or create a profile from local
    /// state when none exists.
    pub fn sync_profile(&mut self) {
        let Some(store) = &self.store else {
            return;
        };
        let user_id = self.config.user_id.clone();
        match store.fetch_profile(&user_id) {
            Ok(Some(profile)) => {
                debug!("loaded profile for {user_id} at level {}", profile.current_level);
                self.thresholds = profile.thresholds();
                self.level = self.clamp_level(profile.current_level);
                self.restart();
            }
            Ok(None) => {
                let profile = Profile::new(&self.config.display_name, self.level, self.thresholds);
                if let Err(e) = store.create_profile(&user_id, &profile) {
                    warn!("could not create profile for {user_id}: {e}");
                }
            }
            Err(e) => warn!("could not fetch profile for {user_id}: {e}"),
        }
    }

    pub fn stage(&self) -> Stage {
        Stage::classify(self.level)
    }

    pub fn attempt_state(&self) -> AttemptState {
        self.attempt.state()
    }

    /// Score one keystroke. Completing the lesson settles the attempt and
    /// moves on to the next lesson.
    pub fn handle_key(&mut self, input: &KeyInput, now: Instant) -> KeyOutcome {
        let outcome = process_key(&mut self.attempt, &self.lesson, &self.keymap, input, now);
        match &outcome {
            KeyOutcome::Ignored => return outcome,
            KeyOutcome::Completed(stats) => {
                self.live = *stats;
                self.finish(*stats);
            }
            _ => self.live = derive_stats(&self.attempt, now),
        }
        self.last_outcome = Some(outcome.clone());
        outcome
    }

    fn finish(&mut self, stats: StatsSnapshot) {
        let passed = evaluate_completion(&stats, &self.thresholds);
        let result = AttemptResult::from_attempt(&self.lesson, &self.attempt, stats, passed);
        self.last_heatmap = result.heatmap();
        self.request_feedback(stats);

        if self.drill_kind == DrillKind::Mistakes {
            info!(
                "mistake drill finished: {} wpm, {}% accuracy",
                stats.wpm, stats.accuracy
            );
            self.status_line = format!(
                "Mistake drill done: {} WPM / {}% Acc",
                stats.wpm, stats.accuracy
            );
            self.last_result = Some(result);
            self.restart();
            return;
        }

        info!(
            "level {} {}: {} wpm, {}% accuracy",
            self.level,
            if passed { "passed" } else { "failed" },
            stats.wpm,
            stats.accuracy
        );
        self.record_attempt(&result);
        self.last_result = Some(result);

        let next = advance_or_repeat(passed, self.level, self.config.max_level);
        if next != self.level {
            self.status_line = format!("Level {} Cleared! Progress Saved.", self.level);
            debug!("advancing from level {} to {next}", self.level);
            self.level = next;
            self.save_progress(Some(stats));
        } else if !passed {
            self.status_line = format!(
                "Repeating: Target {} WPM / {}% Acc",
                self.thresholds.target_wpm, self.thresholds.target_accuracy
            );
        }
        self.restart();
    }

    /// Show the fallback line now and fetch the real one on a helper thread;
    /// `tick` picks it up.
    fn request_feedback(&mut self, stats: StatsSnapshot) {
        self.feedback_seq += 1;
        self.coach_line = Some(FALLBACK_FEEDBACK.to_string());

        let seq = self.feedback_seq;
        let source = Arc::clone(&self.feedback);
        let tx = self.feedback_tx.clone();
        let spawned = thread::Builder::new()
            .name("feedback".to_string())
            .spawn(move || {
                let line = feedback_or_fallback(source.as_ref(), stats.wpm, stats.accuracy);
                // the session may be gone by now
                let _ = tx.send((seq, line));
            });
        if let Err(e) = spawned {
            warn!("could not start feedback request: {e}");
        }
    }

    /// Adopt the feedback line of the latest finished attempt, if it arrived.
    pub fn poll_feedback(&mut self) {
        while let Ok((seq, line)) = self.feedback_rx.try_recv() {
            if seq == self.feedback_seq {
                self.coach_line = Some(line);
            } else {
                debug!("dropping feedback for superseded attempt {seq}");
            }
        }
    }

    /// Refresh live stats and pending feedback. Counters are never touched.
    pub fn tick(&mut self, now: Instant) {
        self.poll_feedback();
        if self.attempt.state() == AttemptState::Active {
            self.live = derive_stats(&self.attempt, now);
        }
    }

    /// Back to Idle with a freshly generated lesson for the current level.
    pub fn restart(&mut self) {
        self.lesson = self.generator.generate(self.level, self.mode, &mut self.rng);
        self.drill_kind = DrillKind::Level;
        self.reset_attempt();
    }

    fn reset_attempt(&mut self) {
        self.attempt = Attempt::new();
        self.live = StatsSnapshot::idle();
        self.last_outcome = None;
    }

    /// Swap in a drill over the keys mistyped in the last finished attempt.
    /// Returns false, leaving the lesson alone, when there is nothing to drill.
    pub fn start_mistake_drill(&mut self) -> bool {
        let lesson = self.generator.mistake_lesson(
            self.level,
            self.mode,
            &self.last_heatmap,
            &mut self.rng,
        );
        let Some(lesson) = lesson else {
            self.status_line = NO_MISTAKES_LINE.to_string();
            return false;
        };
        self.status_line = format!("Mistake drill: {} trouble keys", self.last_heatmap.len());
        self.lesson = lesson;
        self.drill_kind = DrillKind::Mistakes;
        self.reset_attempt();
        true
    }

    fn clamp_level(&self, level: u32) -> u32 {
        level.max(1).min(self.config.max_level.max(1))
    }

    pub fn select_level(&mut self, level: u32) {
        self.level = self.clamp_level(level);
        self.roadmap_selected = self.level;
        debug!("level selected: {}", self.level);
        self.restart();
        self.save_progress(None);
    }

    pub fn set_language(&mut self, mode: LanguageMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.keymap = Keymap::for_mode(mode);
        self.restart();
    }

    pub fn toggle_language(&mut self) {
        self.set_language(self.mode.toggled());
    }

    pub fn set_thresholds(&mut self, thresholds: Thresholds) {
        self.thresholds = Thresholds::new(thresholds.target_wpm, thresholds.target_accuracy);
        self.save_progress(None);
    }

    /// Physical key and finger for the next expected glyph.
    pub fn next_hint(&self) -> Option<KeyHint> {
        self.lesson
            .glyph(self.attempt.cursor())
            .and_then(|glyph| self.keymap.hint_for(glyph))
    }

    pub fn refresh_leaderboard(&mut self) {
        self.leaderboard = match &self.store {
            Some(store) => match store.fetch_leaderboard(LEADERBOARD_SIZE) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("leaderboard unavailable: {e}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
    }

    pub fn refresh_history(&mut self) {
        self.history = match &self.store {
            Some(store) => match store.fetch_history(&self.config.user_id, HISTORY_SIZE) {
                Ok(history) => history,
                Err(e) => {
                    warn!("attempt history unavailable: {e}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
    }

    /// First step of a progress reset; `confirm_reset` finishes it.
    pub fn request_reset(&mut self) {
        self.reset_armed = true;
    }

    pub fn cancel_reset(&mut self) {
        self.reset_armed = false;
    }

    /// Wipe stored progress and history and start over at level 1. Does
    /// nothing unless `request_reset` came first.
    pub fn confirm_reset(&mut self) {
        if !self.reset_armed {
            return;
        }
        self.reset_armed = false;
        if let Some(store) = &self.store
            && let Err(e) = store.reset_progress(&self.config.user_id)
        {
            warn!("could not reset progress: {e}");
        }
        info!("progress reset for {}", self.config.user_id);
        self.level = 1;
        self.roadmap_selected = 1;
        self.last_result = None;
        self.last_heatmap.clear();
        self.history.clear();
        // a pending line belongs to an attempt that no longer counts
        self.feedback_seq += 1;
        self.coach_line = None;
        self.status_line = RESET_LINE.to_string();
        self.restart();
    }

    pub fn go_to_drill(&mut self) {
        self.reset_armed = false;
        self.screen = AppScreen::Drill;
    }

    pub fn go_to_history(&mut self) {
        self.refresh_history();
        self.reset_armed = false;
        self.screen = AppScreen::History;
    }

    pub fn go_to_roadmap(&mut self) {
        self.roadmap_selected = self.level;
        self.screen = AppScreen::Roadmap;
    }

    pub fn go_to_leaderboard(&mut self) {
        self.refresh_leaderboard();
        self.screen = AppScreen::Leaderboard;
    }

    pub fn roadmap_move(&mut self, delta: i64) {
        let next = (i64::from(self.roadmap_selected) + delta).clamp(1, i64::from(u32::MAX));
        self.roadmap_selected = self.clamp_level(next as u32);
    }

    pub fn confirm_roadmap(&mut self) {
        self.select_level(self.roadmap_selected);
        self.screen = AppScreen::Drill;
    }

    fn record_attempt(&self, result: &AttemptResult) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.record_attempt(&self.config.user_id, result) {
            warn!("could not record attempt: {e}");
        }
    }

    fn save_progress(&self, last_stats: Option<StatsSnapshot>) {
        let Some(store) = &self.store else {
            return;
        };
        let update = ProgressUpdate {
            level: self.level,
            thresholds: self.thresholds,
            last_stats,
        };
        if let Err(e) = store.save_progress(&self.config.user_id, &update) {
            warn!("could not save progress: {e}");
        }
    }
}

#[cfg(feature = "network")]
fn feedback_source(config: &Config) -> Box<dyn FeedbackSource> {
    use crate::feedback::HttpFeedback;

    match config.feedback_url.as_deref().map(HttpFeedback::new) {
        Some(Ok(source)) => Box::new(source),
        Some(Err(e)) => {
            warn!("feedback client unavailable: {e}");
            Box::new(StaticFeedback)
        }
        None => Box::new(StaticFeedback),
    }
}

#[cfg(not(feature = "network"))]
fn feedback_source(_config: &Config) -> Box<dyn FeedbackSource> {
    Box::new(StaticFeedback)
}

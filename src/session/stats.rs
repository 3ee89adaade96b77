use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::session::attempt::Attempt;

/// Floor for the elapsed time so an instant finish cannot divide by zero.
const MIN_ELAPSED: Duration = Duration::from_millis(1);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub wpm: u32,
    pub accuracy: u32,
    pub elapsed_secs: u32,
}

impl StatsSnapshot {
    pub fn idle() -> Self {
        Self {
            wpm: 0,
            accuracy: 100,
            elapsed_secs: 0,
        }
    }
}

pub fn elapsed(attempt: &Attempt, now: Instant) -> Option<Duration> {
    let start = attempt.started_at?;
    let end = attempt.finished_at.unwrap_or(now);
    Some(end.saturating_duration_since(start).max(MIN_ELAPSED))
}

pub fn accuracy(correct: usize, incorrect: usize) -> u32 {
    let attempted = correct + incorrect;
    if attempted == 0 {
        return 100;
    }
    (correct as f64 / attempted as f64 * 100.0).round() as u32
}

/// Live or final figures for an attempt. `now` only matters while the
/// attempt is still running.
pub fn derive_stats(attempt: &Attempt, now: Instant) -> StatsSnapshot {
    let Some(elapsed) = elapsed(attempt, now) else {
        return StatsSnapshot::idle();
    };
    let secs = elapsed.as_secs_f64();
    let words = attempt.cursor() as f64 / 5.0;
    StatsSnapshot {
        wpm: (words / (secs / 60.0)).round() as u32,
        accuracy: accuracy(attempt.correct, attempt.incorrect),
        elapsed_secs: secs.round() as u32,
    }
}

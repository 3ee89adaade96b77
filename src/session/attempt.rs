use std::collections::BTreeMap;
use std::time::Instant;

/// Expected glyph -> typed glyph -> occurrences.
pub type ErrorPatterns = BTreeMap<String, BTreeMap<String, u32>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttemptState {
    Idle,
    Active,
    Completed,
}

/// Scoring state for one pass through a lesson. Input only grows: a mismatch
/// is counted but never appended.
#[derive(Clone, Debug, Default)]
pub struct Attempt {
    pub typed: Vec<String>,
    pub correct: usize,
    pub incorrect: usize,
    pub started_at: Option<Instant>,
    pub finished_at: Option<Instant>,
    pub error_patterns: ErrorPatterns,
}

impl Attempt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AttemptState {
        match (self.started_at, self.finished_at) {
            (None, _) => AttemptState::Idle,
            (Some(_), None) => AttemptState::Active,
            (Some(_), Some(_)) => AttemptState::Completed,
        }
    }

    pub fn cursor(&self) -> usize {
        self.typed.len()
    }

    pub fn attempted(&self) -> usize {
        self.correct + self.incorrect
    }

    pub fn record_error(&mut self, expected: &str, typed: &str) {
        *self
            .error_patterns
            .entry(expected.to_string())
            .or_default()
            .entry(typed.to_string())
            .or_insert(0) += 1;
    }

    pub fn progress(&self, lesson_len: usize) -> f64 {
        if lesson_len == 0 {
            return 0.0;
        }
        self.cursor() as f64 / lesson_len as f64
    }
}

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::stage::Stage;
use crate::keyboard::finger::FingerAssignment;
use crate::keyboard::keymap::{Keymap, LanguageMode};
use crate::session::attempt::{Attempt, ErrorPatterns};
use crate::session::lesson::Lesson;
use crate::session::stats::StatsSnapshot;

/// A finished attempt, kept after the session moves on.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AttemptResult {
    pub level: u32,
    pub stage: Stage,
    pub language: LanguageMode,
    pub wpm: u32,
    pub accuracy: u32,
    pub elapsed_secs: u32,
    pub correct: usize,
    pub incorrect: usize,
    pub total_glyphs: usize,
    pub passed: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub error_patterns: ErrorPatterns,
}

impl AttemptResult {
    pub fn from_attempt(
        lesson: &Lesson,
        attempt: &Attempt,
        stats: StatsSnapshot,
        passed: bool,
    ) -> Self {
        Self {
            level: lesson.level,
            stage: lesson.stage,
            language: lesson.mode,
            wpm: stats.wpm,
            accuracy: stats.accuracy,
            elapsed_secs: stats.elapsed_secs,
            correct: attempt.correct,
            incorrect: attempt.incorrect,
            total_glyphs: lesson.len(),
            passed,
            timestamp: Utc::now(),
            error_patterns: attempt.error_patterns.clone(),
        }
    }

    /// Expected glyphs that were mistyped at least once.
    pub fn heatmap(&self) -> BTreeSet<String> {
        self.error_patterns.keys().cloned().collect()
    }

    /// Most frequent wrong glyph for each mistyped expected glyph.
    pub fn worst_confusions(&self) -> Vec<(String, String, u32)> {
        let mut confusions: Vec<(String, String, u32)> = self
            .error_patterns
            .iter()
            .filter_map(|(expected, typed)| {
                typed
                    .iter()
                    .max_by_key(|&(_, &count)| count)
                    .map(|(t, &count)| (expected.clone(), t.clone(), count))
            })
            .collect();
        confusions.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
        confusions
    }

    /// `'typed' vs 'expected' (Nx)` for the three most frequent confusions,
    /// or `Clean Run`.
    pub fn confusion_summary(&self) -> String {
        let mut pairs: Vec<(&str, &str, u32)> = self
            .error_patterns
            .iter()
            .flat_map(|(expected, typed)| {
                typed
                    .iter()
                    .map(move |(t, &count)| (expected.as_str(), t.as_str(), count))
            })
            .collect();
        if pairs.is_empty() {
            return CLEAN_RUN.to_string();
        }
        pairs.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(b.0)));
        let mut summary = pairs
            .iter()
            .take(SUMMARY_PAIRS)
            .map(|(expected, typed, count)| {
                format!("'{}' vs '{}' ({count}x)", glyph_label(typed), glyph_label(expected))
            })
            .collect::<Vec<_>>()
            .join(", ");
        if pairs.len() > SUMMARY_PAIRS {
            summary.push_str("...");
        }
        summary
    }

    /// Finger behind the most confused glyph, if the keymap can place it.
    pub fn weakest_finger(&self, keymap: &Keymap) -> Option<FingerAssignment> {
        let (expected, _, _) = self.worst_confusions().into_iter().next()?;
        keymap.hint_for(&expected).and_then(|hint| hint.finger)
    }
}

const CLEAN_RUN: &str = "Clean Run";
const SUMMARY_PAIRS: usize = 3;

fn glyph_label(glyph: &str) -> &str {
    if glyph == " " { "Space" } else { glyph }
}

use serde::{Deserialize, Serialize};

use crate::session::stats::StatsSnapshot;

pub const DEFAULT_TARGET_WPM: u32 = 40;
pub const DEFAULT_TARGET_ACCURACY: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub target_wpm: u32,
    pub target_accuracy: u32,
}

impl Thresholds {
    pub fn new(target_wpm: u32, target_accuracy: u32) -> Self {
        Self {
            target_wpm,
            target_accuracy: target_accuracy.min(100),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_WPM, DEFAULT_TARGET_ACCURACY)
    }
}

/// Both targets must hold at once; there is no partial credit.
pub fn evaluate_completion(stats: &StatsSnapshot, thresholds: &Thresholds) -> bool {
    stats.wpm >= thresholds.target_wpm && stats.accuracy >= thresholds.target_accuracy
}

pub fn advance_or_repeat(passed: bool, level: u32, max_level: u32) -> u32 {
    if passed && level < max_level {
        level + 1
    } else {
        level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(wpm: u32, accuracy: u32) -> StatsSnapshot {
        StatsSnapshot {
            wpm,
            accuracy,
            elapsed_secs: 10,
        }
    }

    #[test]
    fn passes_only_when_both_targets_hold() {
        let t = Thresholds::new(15, 95);
        assert!(evaluate_completion(&stats(15, 95), &t));
        assert!(evaluate_completion(&stats(80, 100), &t));
        assert!(!evaluate_completion(&stats(14, 100), &t));
        assert!(!evaluate_completion(&stats(200, 94), &t));
        assert!(!evaluate_completion(&stats(0, 0), &t));
    }

    #[test]
    fn advance_on_pass() {
        assert_eq!(advance_or_repeat(true, 1, 300), 2);
        assert_eq!(advance_or_repeat(true, 299, 300), 300);
    }

    #[test]
    fn repeat_on_fail() {
        assert_eq!(advance_or_repeat(false, 42, 300), 42);
    }

    #[test]
    fn never_passes_the_cap() {
        assert_eq!(advance_or_repeat(true, 300, 300), 300);
        assert_eq!(advance_or_repeat(true, 1, 1), 1);
    }

    #[test]
    fn accuracy_target_is_clamped() {
        assert_eq!(Thresholds::new(40, 150).target_accuracy, 100);
        assert_eq!(Thresholds::default(), Thresholds::new(40, 100));
    }
}

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::progression::{DEFAULT_TARGET_ACCURACY, DEFAULT_TARGET_WPM, Thresholds};
use crate::session::result::AttemptResult;
use crate::session::stats::StatsSnapshot;

pub const SCHEMA_VERSION: u32 = 1;

/// Persisted learner state. Missing fields fall back to defaults so older or
/// hand-edited files still load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub display_name: String,
    pub current_level: u32,
    pub target_wpm: u32,
    pub target_accuracy: u32,
    pub best_wpm: u32,
    pub best_accuracy: u32,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            current_level: 1,
            target_wpm: DEFAULT_TARGET_WPM,
            target_accuracy: DEFAULT_TARGET_ACCURACY,
            best_wpm: 0,
            best_accuracy: 0,
            updated_at: None,
        }
    }
}

impl Profile {
    pub fn new(display_name: &str, level: u32, thresholds: Thresholds) -> Self {
        Self {
            display_name: display_name.to_string(),
            current_level: level,
            target_wpm: thresholds.target_wpm,
            target_accuracy: thresholds.target_accuracy,
            updated_at: Some(Utc::now()),
            ..Self::default()
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds::new(self.target_wpm, self.target_accuracy)
    }

    /// Keep `stats` as the best attempt when it ranks higher, wpm first. Both
    /// numbers always come from one attempt.
    pub fn record_best(&mut self, stats: &StatsSnapshot) {
        if (stats.wpm, stats.accuracy) > (self.best_wpm, self.best_accuracy) {
            self.best_wpm = stats.wpm;
            self.best_accuracy = stats.accuracy;
        }
    }

    /// Level 1 and no best attempt; name and targets stay.
    pub fn reset(&mut self) {
        self.current_level = 1;
        self.best_wpm = 0;
        self.best_accuracy = 0;
        self.updated_at = Some(Utc::now());
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfilesData {
    pub schema_version: u32,
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for ProfilesData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            profiles: BTreeMap::new(),
        }
    }
}

/// Finished level attempts per user, oldest first.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryData {
    pub schema_version: u32,
    #[serde(default)]
    pub attempts: BTreeMap<String, Vec<AttemptResult>>,
}

impl Default for HistoryData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            attempts: BTreeMap::new(),
        }
    }
}

/// A profile's rank: its level and its best attempt's wpm and accuracy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub display_name: String,
    pub level: u32,
    pub wpm: u32,
    pub accuracy: u32,
}

impl LeaderboardEntry {
    pub fn from_profile(user_id: &str, profile: &Profile) -> Self {
        let display_name = if profile.display_name.is_empty() {
            user_id.to_string()
        } else {
            profile.display_name.clone()
        };
        Self {
            display_name,
            level: profile.current_level,
            wpm: profile.best_wpm,
            accuracy: profile.best_accuracy,
        }
    }

    /// Best entry first.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .level
            .cmp(&self.level)
            .then_with(|| other.wpm.cmp(&self.wpm))
            .then_with(|| other.accuracy.cmp(&self.accuracy))
            .then_with(|| self.display_name.cmp(&other.display_name))
    }
}

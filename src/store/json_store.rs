use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;
use log::warn;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::session::result::AttemptResult;
use crate::store::schema::{HistoryData, LeaderboardEntry, Profile, ProfilesData, SCHEMA_VERSION};
use crate::store::{ProgressStore, ProgressUpdate, StoreError};

const PROFILES_FILE: &str = "profiles.json";
const HISTORY_FILE: &str = "history.json";
/// Attempts kept per user; older ones are dropped on write.
pub const MAX_HISTORY_PER_USER: usize = 500;

/// `ProgressStore` backed by a single JSON file under the data directory.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self, StoreError> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keyladder");
        Self::with_base_dir(base_dir)
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn load<T: DeserializeOwned + Default>(&self, filename: &str) -> Result<T, StoreError> {
        let path = self.base_dir.join(filename);
        if !path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn load_profiles(&self) -> Result<ProfilesData, StoreError> {
        let data: ProfilesData = self.load(PROFILES_FILE)?;
        if data.schema_version != SCHEMA_VERSION {
            warn!(
                "{PROFILES_FILE} has schema {} (expected {SCHEMA_VERSION}), loading anyway",
                data.schema_version
            );
        }
        Ok(data)
    }

    fn load_history(&self) -> Result<HistoryData, StoreError> {
        self.load(HISTORY_FILE)
    }

    fn save<T: Serialize>(&self, filename: &str, data: &T) -> Result<(), StoreError> {
        let path = self.base_dir.join(filename);
        let tmp_path = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

impl ProgressStore for JsonStore {
    fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        Ok(self.load_profiles()?.profiles.get(user_id).cloned())
    }

    fn create_profile(&self, user_id: &str, profile: &Profile) -> Result<(), StoreError> {
        let mut data = self.load_profiles()?;
        data.profiles.insert(user_id.to_string(), profile.clone());
        self.save(PROFILES_FILE, &data)
    }

    fn save_progress(&self, user_id: &str, update: &ProgressUpdate) -> Result<(), StoreError> {
        let mut data = self.load_profiles()?;
        let profile = data.profiles.entry(user_id.to_string()).or_default();
        profile.current_level = update.level;
        profile.target_wpm = update.thresholds.target_wpm;
        profile.target_accuracy = update.thresholds.target_accuracy;
        if let Some(stats) = &update.last_stats {
            profile.record_best(stats);
        }
        profile.updated_at = Some(Utc::now());
        self.save(PROFILES_FILE, &data)
    }

    fn fetch_leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let data = self.load_profiles()?;
        let mut entries: Vec<LeaderboardEntry> = data
            .profiles
            .iter()
            .map(|(user_id, profile)| LeaderboardEntry::from_profile(user_id, profile))
            .collect();
        entries.sort_by(LeaderboardEntry::rank_cmp);
        entries.truncate(limit);
        Ok(entries)
    }

    fn record_attempt(&self, user_id: &str, result: &AttemptResult) -> Result<(), StoreError> {
        let mut data = self.load_history()?;
        let attempts = data.attempts.entry(user_id.to_string()).or_default();
        attempts.push(result.clone());
        if attempts.len() > MAX_HISTORY_PER_USER {
            let excess = attempts.len() - MAX_HISTORY_PER_USER;
            attempts.drain(..excess);
        }
        self.save(HISTORY_FILE, &data)
    }

    fn fetch_history(&self, user_id: &str, limit: usize) -> Result<Vec<AttemptResult>, StoreError> {
        let data = self.load_history()?;
        Ok(data
            .attempts
            .get(user_id)
            .map(|attempts| attempts.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    fn reset_progress(&self, user_id: &str) -> Result<(), StoreError> {
        let mut profiles = self.load_profiles()?;
        if let Some(profile) = profiles.profiles.get_mut(user_id) {
            profile.reset();
            self.save(PROFILES_FILE, &profiles)?;
        }
        let mut history = self.load_history()?;
        if history.attempts.remove(user_id).is_some() {
            self.save(HISTORY_FILE, &history)?;
        }
        Ok(())
    }
}

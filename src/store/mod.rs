pub mod json_store;
pub mod schema;

use thiserror::Error;

use crate::engine::progression::Thresholds;
use crate::session::result::AttemptResult;
use crate::session::stats::StatsSnapshot;
use crate::store::schema::{LeaderboardEntry, Profile};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store data is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// What the session reports after an advance, a level pick or a target change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub level: u32,
    pub thresholds: Thresholds,
    pub last_stats: Option<StatsSnapshot>,
}

/// Remote or local home of learner progress. Callers treat every error as
/// non-fatal.
pub trait ProgressStore {
    /// `Ok(None)` when the user has no profile yet.
    fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>, StoreError>;

    fn create_profile(&self, user_id: &str, profile: &Profile) -> Result<(), StoreError>;

    fn save_progress(&self, user_id: &str, update: &ProgressUpdate) -> Result<(), StoreError>;

    /// Ordered by level, then wpm, then accuracy, all descending.
    fn fetch_leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, StoreError>;

    fn record_attempt(&self, user_id: &str, result: &AttemptResult) -> Result<(), StoreError>;

    /// Newest attempt first.
    fn fetch_history(&self, user_id: &str, limit: usize) -> Result<Vec<AttemptResult>, StoreError>;

    /// Back to level 1 with no best scores and no history. Unknown users are
    /// left alone.
    fn reset_progress(&self, user_id: &str) -> Result<(), StoreError>;
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::progression::{DEFAULT_TARGET_ACCURACY, DEFAULT_TARGET_WPM, Thresholds};
use crate::generator::DEFAULT_DRILL_LENGTH;
use crate::keyboard::keymap::LanguageMode;

pub const DEFAULT_MAX_LEVEL: u32 = 300;
pub const MIN_TICK_MS: u64 = 100;
pub const MAX_TICK_MS: u64 = 1000;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_target_wpm")]
    pub target_wpm: u32,
    #[serde(default = "default_target_accuracy")]
    pub target_accuracy: u32,
    #[serde(default = "default_max_level")]
    pub max_level: u32,
    #[serde(default = "default_drill_length")]
    pub drill_length: usize,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default = "default_display_name")]
    pub display_name: String,
    #[serde(default)]
    pub feedback_url: Option<String>,
}

fn default_target_wpm() -> u32 {
    DEFAULT_TARGET_WPM
}
fn default_target_accuracy() -> u32 {
    DEFAULT_TARGET_ACCURACY
}
fn default_max_level() -> u32 {
    DEFAULT_MAX_LEVEL
}
fn default_drill_length() -> usize {
    DEFAULT_DRILL_LENGTH
}
fn default_language() -> String {
    LanguageMode::Primary.as_str().to_string()
}
fn default_tick_ms() -> u64 {
    500
}
fn default_user_id() -> String {
    "local".to_string()
}
fn default_display_name() -> String {
    "learner".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_wpm: default_target_wpm(),
            target_accuracy: default_target_accuracy(),
            max_level: default_max_level(),
            drill_length: default_drill_length(),
            language: default_language(),
            tick_ms: default_tick_ms(),
            user_id: default_user_id(),
            display_name: default_display_name(),
            feedback_url: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str::<Config>(&content)?
        } else {
            Config::default()
        };
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keyladder")
            .join("config.toml")
    }

    /// Clamp values a hand-edited file may have pushed out of range.
    pub fn normalize(&mut self) {
        self.max_level = self.max_level.max(1);
        self.target_accuracy = self.target_accuracy.min(100);
        self.drill_length = self.drill_length.max(1);
        self.tick_ms = self.tick_ms.clamp(MIN_TICK_MS, MAX_TICK_MS);
        if LanguageMode::from_key(&self.language).is_none() {
            self.language = default_language();
        }
        if self.user_id.trim().is_empty() {
            self.user_id = default_user_id();
        }
        if self
            .feedback_url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            self.feedback_url = None;
        }
    }

    pub fn language_mode(&self) -> LanguageMode {
        LanguageMode::from_key(&self.language).unwrap_or_default()
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds::new(self.target_wpm, self.target_accuracy)
    }
}

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Width of each row stage, in levels.
pub const ROW_STAGE_WIDTH: u32 = 25;

/// Curriculum phases in teaching order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    HomeRow,
    TopRow,
    BottomRow,
    MasteryMix,
    WordMastery,
    SentenceFlow,
    ParagraphStamina,
    ExtremeMastery,
}

impl Stage {
    pub const ALL: [Stage; 8] = [
        Stage::HomeRow,
        Stage::TopRow,
        Stage::BottomRow,
        Stage::MasteryMix,
        Stage::WordMastery,
        Stage::SentenceFlow,
        Stage::ParagraphStamina,
        Stage::ExtremeMastery,
    ];

    /// Stage of a level. Level 0 is read as level 1.
    pub fn classify(level: u32) -> Stage {
        match level {
            0..=25 => Stage::HomeRow,
            26..=50 => Stage::TopRow,
            51..=75 => Stage::BottomRow,
            76..=100 => Stage::MasteryMix,
            101..=150 => Stage::WordMastery,
            151..=200 => Stage::SentenceFlow,
            201..=250 => Stage::ParagraphStamina,
            _ => Stage::ExtremeMastery,
        }
    }

    /// First level of the stage.
    pub fn floor(self) -> u32 {
        match self {
            Stage::HomeRow => 1,
            Stage::TopRow => 26,
            Stage::BottomRow => 51,
            Stage::MasteryMix => 76,
            Stage::WordMastery => 101,
            Stage::SentenceFlow => 151,
            Stage::ParagraphStamina => 201,
            Stage::ExtremeMastery => 251,
        }
    }

    /// Levels belonging to this stage, limited by the curriculum cap. Empty
    /// when the cap ends before the stage starts.
    pub fn level_range(self, max_level: u32) -> RangeInclusive<u32> {
        let last = match self.next() {
            Some(next) => next.floor() - 1,
            None => u32::MAX,
        };
        self.floor()..=last.min(max_level)
    }

    /// Zero-based position of `level` inside this stage.
    pub fn sub_level(self, level: u32) -> u32 {
        level.max(1).saturating_sub(self.floor())
    }

    pub fn next(self) -> Option<Stage> {
        let idx = Stage::ALL.iter().position(|&s| s == self)?;
        Stage::ALL.get(idx + 1).copied()
    }

    pub fn is_row_stage(self) -> bool {
        matches!(self, Stage::HomeRow | Stage::TopRow | Stage::BottomRow)
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::HomeRow => "Home Row",
            Stage::TopRow => "Top Row",
            Stage::BottomRow => "Bottom Row",
            Stage::MasteryMix => "Mastery Mix",
            Stage::WordMastery => "Word Mastery",
            Stage::SentenceFlow => "Sentence Flow",
            Stage::ParagraphStamina => "Paragraph Stamina",
            Stage::ExtremeMastery => "Extreme Mastery",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub mod drill;
pub mod mistakes;
pub mod passage;
pub mod words;

use std::collections::BTreeSet;

use log::debug;
use rand::RngCore;

use crate::engine::stage::Stage;
use crate::generator::drill::{MasteryDrill, RowDrill};
use crate::generator::mistakes::{MISTAKE_DRILL_LENGTH, MistakeDrill};
use crate::generator::passage::{ExtremeDrill, ParagraphDrill, SentenceDrill};
use crate::generator::words::WordDrill;
use crate::keyboard::keymap::{Keymap, LanguageMode};
use crate::keyboard::layout::Row;
use crate::session::lesson::Lesson;

/// Default glyph count of character drills.
pub const DEFAULT_DRILL_LENGTH: usize = 140;

/// Produces the physical keys of a drill for one level. Output is rendered
/// through the active keymap afterwards.
pub trait TextGenerator {
    fn generate(&self, level: u32, rng: &mut dyn RngCore) -> String;
}

#[derive(Clone, Debug)]
pub struct LessonGenerator {
    pub drill_length: usize,
}

impl Default for LessonGenerator {
    fn default() -> Self {
        Self {
            drill_length: DEFAULT_DRILL_LENGTH,
        }
    }
}

impl LessonGenerator {
    pub fn new(drill_length: usize) -> Self {
        Self {
            drill_length: drill_length.max(1),
        }
    }

    fn text_generator(&self, stage: Stage, mode: LanguageMode) -> Box<dyn TextGenerator> {
        match stage {
            Stage::HomeRow => Box::new(RowDrill::new(Row::Home, self.drill_length)),
            Stage::TopRow => Box::new(RowDrill::new(Row::Top, self.drill_length)),
            Stage::BottomRow => Box::new(RowDrill::new(Row::Bottom, self.drill_length)),
            Stage::MasteryMix => Box::new(MasteryDrill {
                length: self.drill_length,
            }),
            Stage::WordMastery => Box::new(WordDrill::new(mode)),
            Stage::SentenceFlow => Box::new(SentenceDrill::new(mode)),
            Stage::ParagraphStamina => Box::new(ParagraphDrill::new(mode)),
            Stage::ExtremeMastery => Box::new(ExtremeDrill::new(mode)),
        }
    }

    pub fn generate(&self, level: u32, mode: LanguageMode, rng: &mut dyn RngCore) -> Lesson {
        let level = level.max(1);
        let stage = Stage::classify(level);
        let keys = self.text_generator(stage, mode).generate(level, rng);
        let glyphs = Keymap::for_mode(mode).render(&keys);
        debug!(
            "generated {} glyphs for level {level} ({stage}, {})",
            glyphs.len(),
            mode.as_str()
        );
        Lesson::new(level, mode, glyphs)
    }

    /// Drill aimed at `mistaken` glyphs, or `None` when none of them can be
    /// typed in `mode`.
    pub fn mistake_lesson(
        &self,
        level: u32,
        mode: LanguageMode,
        mistaken: &BTreeSet<String>,
        rng: &mut dyn RngCore,
    ) -> Option<Lesson> {
        let keymap = Keymap::for_mode(mode);
        let length = self.drill_length.min(MISTAKE_DRILL_LENGTH);
        let drill = MistakeDrill::from_glyphs(mistaken, &keymap, length);
        if drill.is_empty() {
            return None;
        }
        let glyphs = keymap.render(&drill.generate(level, rng));
        debug!("mistake drill over {} keys, {} glyphs", drill.keys.len(), glyphs.len());
        Some(Lesson::new(level.max(1), mode, glyphs))
    }
}

/// Lesson for `level` with the default drill length.
pub fn generate_lesson(level: u32, mode: LanguageMode, rng: &mut dyn RngCore) -> Lesson {
    LessonGenerator::default().generate(level, mode, rng)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::generator::passage::{paragraph_bank, sentence_bank};
    use crate::generator::words::word_bank;
    use crate::keyboard::layout::{SHIFTED_KEYS, all_row_keys};

    fn rendered_set(keymap: &Keymap, keys: impl IntoIterator<Item = char>) -> HashSet<String> {
        let keys: String = keys.into_iter().collect();
        let mut set: HashSet<String> = keymap.render(&keys).into_iter().collect();
        set.insert(" ".to_string());
        set
    }

    #[test]
    fn every_level_yields_a_non_empty_lesson() {
        let mut rng = SmallRng::seed_from_u64(42);
        for mode in [LanguageMode::Primary, LanguageMode::Alternate] {
            for level in 1..=400 {
                let lesson = generate_lesson(level, mode, &mut rng);
                assert!(!lesson.is_empty(), "empty lesson at {level} ({mode:?})");
                assert_eq!(lesson.stage, Stage::classify(level));
                assert!(lesson.glyph(0) != Some(" "));
            }
        }
    }

    #[test]
    fn level_zero_is_clamped() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(generate_lesson(0, LanguageMode::Primary, &mut rng).level, 1);
    }

    #[test]
    fn row_stages_stay_inside_their_pool() {
        let mut rng = SmallRng::seed_from_u64(8);
        let cases = [(1, Row::Home), (20, Row::Home), (40, Row::Top), (70, Row::Bottom)];
        for mode in [LanguageMode::Primary, LanguageMode::Alternate] {
            let keymap = Keymap::for_mode(mode);
            for (level, row) in cases {
                let allowed = rendered_set(&keymap, row.keys().iter().copied());
                let lesson = generate_lesson(level, mode, &mut rng);
                for glyph in lesson.glyphs() {
                    assert!(allowed.contains(glyph), "{glyph:?} not in {row:?} pool");
                }
                assert!(lesson.len() <= DEFAULT_DRILL_LENGTH);
            }
        }
    }

    #[test]
    fn mastery_mix_uses_all_rows_and_unlocked_shift_keys() {
        let mut rng = SmallRng::seed_from_u64(13);
        let keymap = Keymap::identity();
        let allowed = rendered_set(
            &keymap,
            all_row_keys().into_iter().chain(SHIFTED_KEYS.chars().take(12)),
        );
        let lesson = generate_lesson(100, LanguageMode::Primary, &mut rng);
        assert!(lesson.glyphs().iter().all(|g| allowed.contains(g)));
    }

    #[test]
    fn word_stage_only_uses_bank_words() {
        let mut rng = SmallRng::seed_from_u64(21);
        for mode in [LanguageMode::Primary, LanguageMode::Alternate] {
            let keymap = Keymap::for_mode(mode);
            let bank: HashSet<String> = word_bank(mode)
                .iter()
                .map(|w| keymap.render(w).concat())
                .collect();
            let text = generate_lesson(130, mode, &mut rng).text();
            for word in text.split(' ') {
                assert!(bank.contains(word), "{word:?} not in bank");
            }
        }
    }

    #[test]
    fn alternate_banks_are_fully_mapped() {
        let keymap = Keymap::nepali();
        let banks = [
            word_bank(LanguageMode::Alternate),
            sentence_bank(LanguageMode::Alternate),
            paragraph_bank(LanguageMode::Alternate),
        ];
        for entry in banks.iter().flat_map(|b| b.iter()) {
            for glyph in keymap.render(entry) {
                assert!(
                    !glyph.chars().any(|c| c.is_ascii_alphabetic()),
                    "unmapped key in {entry:?}"
                );
            }
        }
    }

    #[test]
    fn alternate_glyphs_are_typable() {
        let keymap = Keymap::nepali();
        let mut rng = SmallRng::seed_from_u64(2);
        for level in [3, 30, 60, 90, 120, 170, 220, 280] {
            let lesson = generate_lesson(level, LanguageMode::Alternate, &mut rng);
            for glyph in lesson.glyphs() {
                let hint = keymap.hint_for(glyph).expect("glyph must have a key");
                assert_eq!(&keymap.resolve(hint.key, hint.shift), glyph);
            }
        }
    }

    #[test]
    fn mistake_lesson_targets_mistaken_glyphs() {
        let generator = LessonGenerator::default();
        let mut rng = SmallRng::seed_from_u64(6);
        let mistaken: BTreeSet<String> = ["k", ";"].iter().map(|g| g.to_string()).collect();
        let lesson = generator
            .mistake_lesson(12, LanguageMode::Primary, &mistaken, &mut rng)
            .unwrap();
        assert_eq!(lesson.level, 12);
        assert!(!lesson.is_empty());
        assert!(lesson.len() <= MISTAKE_DRILL_LENGTH);
        assert!(lesson.glyphs().iter().all(|g| g == " " || mistaken.contains(g)));
    }

    #[test]
    fn mistake_lesson_respects_short_drills() {
        let generator = LessonGenerator::new(30);
        let mut rng = SmallRng::seed_from_u64(6);
        let mistaken: BTreeSet<String> = ["a".to_string()].into_iter().collect();
        let lesson = generator
            .mistake_lesson(1, LanguageMode::Primary, &mistaken, &mut rng)
            .unwrap();
        assert!(lesson.len() <= 30);
    }

    #[test]
    fn mistake_lesson_needs_typable_glyphs() {
        let generator = LessonGenerator::default();
        let mut rng = SmallRng::seed_from_u64(6);
        assert!(generator
            .mistake_lesson(1, LanguageMode::Primary, &BTreeSet::new(), &mut rng)
            .is_none());
        let nepali: BTreeSet<String> = Keymap::nepali().render("s").into_iter().collect();
        assert!(generator
            .mistake_lesson(1, LanguageMode::Primary, &nepali, &mut rng)
            .is_none());
    }

    #[test]
    fn drill_length_is_configurable() {
        let generator = LessonGenerator::new(40);
        let mut rng = SmallRng::seed_from_u64(4);
        let lesson = generator.generate(10, LanguageMode::Primary, &mut rng);
        assert!(lesson.len() <= 40);
        assert!(lesson.len() >= 38);
    }
}

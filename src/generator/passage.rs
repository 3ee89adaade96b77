use rand::RngCore;
use rand::seq::SliceRandom;

use crate::engine::stage::Stage;
use crate::generator::TextGenerator;
use crate::keyboard::keymap::LanguageMode;

const SENTENCES_EN: &[&str] = &[
    "The quick brown fox jumps over the lazy dog.",
    "Practice makes progress, not perfection.",
    "Keep your eyes on the screen and your fingers on the home row.",
    "A steady rhythm beats a frantic burst of speed.",
    "Small daily habits build lasting skills.",
    "Every expert was once a beginner who kept going.",
    "Slow down to speed up; accuracy comes first.",
    "The river flows quietly through the green valley.",
    "She opened the window and let the morning air inside.",
    "Good posture keeps your wrists relaxed and your typing smooth.",
    "Curiosity is the engine of learning.",
    "He wrote the letter twice before he was happy with it.",
];

const PARAGRAPHS_EN: &[&str] = &[
    "Typing well is less about raw speed and more about calm, repeatable motion. \
     Rest your fingers on the home row, let each finger own its column, and return \
     to the anchor keys after every reach. Speed follows once the movements stop \
     needing conscious thought.",
    "The old lighthouse stood at the edge of the cliff, its white paint peeling in \
     the salt wind. Every night for a hundred years its lamp had turned, sweeping \
     the dark water and guiding ships safely past the rocks below.",
    "A good habit is built one small repetition at a time. Choose a fixed moment \
     of the day, keep the session short enough to finish, and measure something \
     simple. Over weeks the numbers climb quietly, and the effort starts to feel \
     like part of the routine.",
    "Rain tapped against the glass while the kettle began to hum. She wrapped her \
     hands around the warm cup, opened the notebook to a fresh page, and wrote the \
     first sentence of the story she had been carrying in her head all week.",
];

// Physical keys on the romanized Nepali layout; rendered through the keymap.
const SENTENCES_NE: &[&str] = &[
    "cfdf kfgL nf",          // आमा पानी ला
    "tldL eft vf",           // तिमी भात खा
    "xfdL g]kfnL efif ;ls",  // हामी नेपाली भाषा सिक
    "blbL vfgf vf",          // दिदी खाना खा
    "dfdf ;fy hf",           // मामा साथ जा
    "afaf sfd uf",           // बाबा काम गा
];

const PARAGRAPHS_NE: &[&str] = &[
    "cfdf kfgL nf tldL eft vf blbL vfgf vf dfdf ;fy hf",
    "xfdL g]kfnL efif ;ls afaf sfd uf cfdf kfgL nf tldL eft vf",
];

pub const MIN_SENTENCES: u32 = 2;
pub const MAX_SENTENCES: u32 = 4;
/// Sub-levels per extra sentence; the last third of the stage reaches the cap.
pub const SENTENCE_STEP: u32 = 17;
pub const EXTREME_BASE_LEN: usize = 200;
pub const EXTREME_STEP_LEN: usize = 10;
pub const EXTREME_MAX_LEN: usize = 600;

pub fn sentence_bank(mode: LanguageMode) -> &'static [&'static str] {
    match mode {
        LanguageMode::Primary => SENTENCES_EN,
        LanguageMode::Alternate => SENTENCES_NE,
    }
}

pub fn paragraph_bank(mode: LanguageMode) -> &'static [&'static str] {
    match mode {
        LanguageMode::Primary => PARAGRAPHS_EN,
        LanguageMode::Alternate => PARAGRAPHS_NE,
    }
}

pub fn sentence_count(level: u32) -> usize {
    let sub = Stage::SentenceFlow.sub_level(level);
    (MIN_SENTENCES + sub / SENTENCE_STEP).min(MAX_SENTENCES) as usize
}

/// Minimum key count of an extreme passage at `level`.
pub fn extreme_length(level: u32) -> usize {
    let sub = Stage::ExtremeMastery.sub_level(level) as usize;
    (EXTREME_BASE_LEN + EXTREME_STEP_LEN * sub).min(EXTREME_MAX_LEN)
}

pub struct SentenceDrill {
    bank: &'static [&'static str],
}

impl SentenceDrill {
    pub fn new(mode: LanguageMode) -> Self {
        Self {
            bank: sentence_bank(mode),
        }
    }
}

impl TextGenerator for SentenceDrill {
    fn generate(&self, level: u32, rng: &mut dyn RngCore) -> String {
        (0..sentence_count(level))
            .filter_map(|_| self.bank.choose(&mut *rng).copied())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub struct ParagraphDrill {
    bank: &'static [&'static str],
}

impl ParagraphDrill {
    pub fn new(mode: LanguageMode) -> Self {
        Self {
            bank: paragraph_bank(mode),
        }
    }
}

impl TextGenerator for ParagraphDrill {
    fn generate(&self, level: u32, _rng: &mut dyn RngCore) -> String {
        if self.bank.is_empty() {
            return String::new();
        }
        normalize_whitespace(self.bank[level as usize % self.bank.len()])
    }
}

/// Sentence draws strung together until the passage is long enough.
pub struct ExtremeDrill {
    bank: &'static [&'static str],
}

impl ExtremeDrill {
    pub fn new(mode: LanguageMode) -> Self {
        Self {
            bank: sentence_bank(mode),
        }
    }
}

impl TextGenerator for ExtremeDrill {
    fn generate(&self, level: u32, rng: &mut dyn RngCore) -> String {
        let target = extreme_length(level);
        let mut out = String::new();
        while out.chars().count() < target {
            let Some(sentence) = self.bank.choose(&mut *rng) else {
                break;
            };
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(sentence);
        }
        out
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn sentence_count_scales() {
        assert_eq!(sentence_count(151), 2);
        assert_eq!(sentence_count(167), 2);
        assert_eq!(sentence_count(168), 3);
        assert_eq!(sentence_count(185), 4);
        assert_eq!(sentence_count(200), 4);
        assert_eq!(sentence_count(1000), 4);
    }

    #[test]
    fn sentence_cap_is_reached_inside_the_stage() {
        let (first, last) = (Stage::SentenceFlow.floor(), Stage::ParagraphStamina.floor() - 1);
        assert_eq!(Stage::classify(last), Stage::SentenceFlow);
        let counts: Vec<usize> = (first..=last).map(sentence_count).collect();
        assert!(counts.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(counts.last().copied(), Some(MAX_SENTENCES as usize));
    }

    #[test]
    fn extreme_length_scales_and_caps() {
        assert_eq!(extreme_length(251), 200);
        assert_eq!(extreme_length(261), 300);
        assert_eq!(extreme_length(300), 600);
        assert_eq!(extreme_length(400), 600);
    }

    #[test]
    fn sentences_come_from_the_bank() {
        let drill = SentenceDrill::new(LanguageMode::Primary);
        let mut rng = SmallRng::seed_from_u64(5);
        let text = drill.generate(151, &mut rng);
        let mut rest = text.as_str();
        let mut count = 0;
        while !rest.is_empty() {
            let sentence = SENTENCES_EN
                .iter()
                .find(|s| rest.starts_with(*s))
                .expect("text should be made of bank sentences");
            rest = rest[sentence.len()..].trim_start();
            count += 1;
        }
        assert_eq!(count, sentence_count(151));
    }

    #[test]
    fn paragraph_is_picked_by_level() {
        let drill = ParagraphDrill::new(LanguageMode::Primary);
        let mut rng = SmallRng::seed_from_u64(0);
        let a = drill.generate(204, &mut rng);
        let b = drill.generate(204 + PARAGRAPHS_EN.len() as u32, &mut rng);
        assert_eq!(a, b);
        assert!(!a.contains("  "));
        assert!(a.starts_with("Typing well"));
    }

    #[test]
    fn extreme_reaches_its_length() {
        let drill = ExtremeDrill::new(LanguageMode::Primary);
        let mut rng = SmallRng::seed_from_u64(9);
        let text = drill.generate(270, &mut rng);
        assert!(text.chars().count() >= extreme_length(270));
    }

    #[test]
    fn banks_are_non_empty() {
        for mode in [LanguageMode::Primary, LanguageMode::Alternate] {
            assert!(!sentence_bank(mode).is_empty());
            assert!(!paragraph_bank(mode).is_empty());
        }
    }
}

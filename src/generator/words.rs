use rand::RngCore;
use rand::seq::SliceRandom;

use crate::engine::stage::Stage;
use crate::generator::TextGenerator;
use crate::keyboard::keymap::LanguageMode;

const WORDS_EN: &[&str] = &[
    "the", "and", "that", "have", "with", "this", "from", "they", "would", "there", "their",
    "what", "about", "which", "when", "make", "like", "time", "just", "know", "take", "people",
    "year", "good", "some", "could", "them", "see", "other", "than", "then", "now", "look",
    "only", "come", "over", "think", "also", "back", "after", "use", "two", "how", "our",
    "work", "first", "well", "way", "even", "new", "want", "because", "any", "these", "give",
    "day", "most", "keyboard", "finger", "practice", "steady", "rhythm", "flow", "learn",
];

// Physical keys on the romanized Nepali layout; rendered through the keymap.
const WORDS_NE: &[&str] = &[
    "sdn",   // कमल
    "jg",    // वन
    "gfd",   // नाम
    "a;",    // बस
    "sfd",   // काम
    "bfd",   // दाम
    "hn",    // जल
    "dg",    // मन
    "wg",    // धन
    "tg",    // तन
    ";a",    // सब
    "ca",    // अब
    "xft",   // हात
    "eft",   // भात
    ";fy",   // साथ
    "afaf",  // बाबा
    "cfdf",  // आमा
    "dfdf",  // मामा
    "sfsf",  // काका
    "blg",   // दिन
    "gbL",   // नदी
    "kfgL",  // पानी
    "vfgf",  // खाना
    ";kgf",  // सपना
    "tldL",  // तिमी
    "xfdL",  // हामी
    "efif",  // भाषा
    "b]z",   // देश
    ";do",   // समय
    "d]nf",  // मेला
];

pub const MIN_WORDS: u32 = 10;
pub const MAX_WORDS: u32 = 15;

pub fn word_bank(mode: LanguageMode) -> &'static [&'static str] {
    match mode {
        LanguageMode::Primary => WORDS_EN,
        LanguageMode::Alternate => WORDS_NE,
    }
}

/// Words per lesson: grows by one every ten levels into the stage.
pub fn word_count(level: u32) -> usize {
    let sub = Stage::WordMastery.sub_level(level);
    (MIN_WORDS + sub / 10).min(MAX_WORDS) as usize
}

pub struct WordDrill {
    bank: &'static [&'static str],
}

impl WordDrill {
    pub fn new(mode: LanguageMode) -> Self {
        Self {
            bank: word_bank(mode),
        }
    }
}

impl TextGenerator for WordDrill {
    fn generate(&self, level: u32, rng: &mut dyn RngCore) -> String {
        (0..word_count(level))
            .filter_map(|_| self.bank.choose(&mut *rng).copied())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn word_count_scales_and_caps() {
        assert_eq!(word_count(101), 10);
        assert_eq!(word_count(111), 11);
        assert_eq!(word_count(150), 14);
        assert_eq!(word_count(400), 15);
    }

    #[test]
    fn draws_only_bank_words() {
        let drill = WordDrill::new(LanguageMode::Primary);
        let mut rng = SmallRng::seed_from_u64(11);
        let text = drill.generate(120, &mut rng);
        let words: Vec<&str> = text.split(' ').collect();
        assert_eq!(words.len(), word_count(120));
        assert!(words.iter().all(|w| WORDS_EN.contains(w)));
    }

    #[test]
    fn banks_are_non_empty() {
        assert!(!word_bank(LanguageMode::Primary).is_empty());
        assert!(!word_bank(LanguageMode::Alternate).is_empty());
    }
}

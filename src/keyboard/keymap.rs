use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::keyboard::finger::{FingerAssignment, qwerty_finger};
use crate::keyboard::layout::{QWERTY, is_shifted};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageMode {
    #[default]
    #[serde(rename = "en")]
    Primary,
    #[serde(rename = "ne")]
    Alternate,
}

impl LanguageMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageMode::Primary => "en",
            LanguageMode::Alternate => "ne",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "en" => Some(LanguageMode::Primary),
            "ne" => Some(LanguageMode::Alternate),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            LanguageMode::Primary => LanguageMode::Alternate,
            LanguageMode::Alternate => LanguageMode::Primary,
        }
    }
}

impl fmt::Display for LanguageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

// Nepali romanized layout. Values may be multi-codepoint clusters.
const NEPALI_UNSHIFTED: &[(char, &str)] = &[
    ('a', "ब"),
    ('s', "क"),
    ('d', "म"),
    ('f', "ा"),
    ('g', "न"),
    ('h', "ज"),
    ('j', "व"),
    ('k', "प"),
    ('l', "ि"),
    (';', "स"),
    ('q', "त्र"),
    ('w', "ध"),
    ('e', "भ"),
    ('r', "च"),
    ('t', "त"),
    ('y', "थ"),
    ('u', "ग"),
    ('i', "ष"),
    ('o', "य"),
    ('p', "उ"),
    ('z', "श"),
    ('x', "ह"),
    ('c', "अ"),
    ('v', "ख"),
    ('b', "द"),
    ('n', "ल"),
    ('m', "ङ"),
    ('1', "१"),
    ('2', "२"),
    ('3', "३"),
    ('4', "४"),
    ('5', "५"),
    ('6', "६"),
    ('7', "७"),
    ('8', "८"),
    ('9', "९"),
    ('0', "०"),
    ('/', "ः"),
    ('\'', "य्"),
    (' ', " "),
    ('[', "ृ"),
    (']', "े"),
    (',', "ो"),
    ('.', "ौ"),
    ('\\', "्र"),
];

const NEPALI_SHIFTED: &[(char, &str)] = &[
    ('A', "ब्"),
    ('S', "ख्"),
    ('D', "ष्"),
    ('F', "ा"),
    ('G', "न्"),
    ('H', "ज्"),
    ('J', "व्"),
    ('K', "फ्"),
    ('L', "ी"),
    (':', "स्"),
    ('Q', "त्त"),
    ('W', "ध्र"),
    ('E', "भ्र"),
    ('R', "च्र"),
    ('T', "त्र"),
    ('Y', "थ्र"),
    ('U', "गि"),
    ('I', "षि"),
    ('O', "यि"),
    ('P', "उि"),
    ('Z', "श्"),
    ('X', "ह्"),
    ('C', "अ्र"),
    ('V', "ख्"),
    ('B', "द्"),
    ('N', "ल्"),
    ('M', "ङ्र"),
    ('!', "!"),
    ('@', "@"),
    ('#', "#"),
    ('$', "$"),
    ('%', "%"),
    ('^', "^"),
    ('&', "&"),
    ('*', "*"),
    ('(', "("),
    (')', ")"),
    ('_', "_"),
    ('+', "+"),
    ('"', "य्"),
    ('<', "ो"),
    ('>', "ौ"),
    ('?', "रु"),
    ('{', "ै"),
    ('}', "ो"),
    ('|', "्र"),
];

/// Translation from physical key identity to the glyph a keystroke produces.
/// An empty keymap is the identity mapping used by the primary mode.
#[derive(Clone, Debug, Default)]
pub struct Keymap {
    unshifted: HashMap<char, String>,
    shifted: HashMap<char, String>,
}

/// What to press for the next expected glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyHint {
    /// Character the keyboard reports, shifted layer included.
    pub key: char,
    pub shift: bool,
    pub finger: Option<FingerAssignment>,
}

impl Keymap {
    pub fn new(unshifted: HashMap<char, String>, shifted: HashMap<char, String>) -> Self {
        Self { unshifted, shifted }
    }

    pub fn identity() -> Self {
        Self::default()
    }

    pub fn nepali() -> Self {
        let table = |pairs: &[(char, &str)]| {
            pairs
                .iter()
                .map(|&(k, v)| (k, v.to_string()))
                .collect::<HashMap<_, _>>()
        };
        Self::new(table(NEPALI_UNSHIFTED), table(NEPALI_SHIFTED))
    }

    pub fn for_mode(mode: LanguageMode) -> Self {
        match mode {
            LanguageMode::Primary => Self::identity(),
            LanguageMode::Alternate => Self::nepali(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.unshifted.is_empty() && self.shifted.is_empty()
    }

    /// Effective glyph for a raw key. With shift held the shifted table wins,
    /// then the unshifted table, then the raw key itself.
    pub fn resolve(&self, raw: char, shift: bool) -> String {
        let lower = raw.to_lowercase().next().unwrap_or(raw);
        if shift {
            let upper = raw.to_uppercase().next().unwrap_or(raw);
            if let Some(glyph) = self
                .shifted
                .get(&raw)
                .or_else(|| self.shifted.get(&upper))
                .or_else(|| self.unshifted.get(&lower))
            {
                return glyph.clone();
            }
        } else if let Some(glyph) = self.unshifted.get(&lower) {
            return glyph.clone();
        }
        raw.to_string()
    }

    /// Render a string of physical keys into the glyphs this keymap produces
    /// for them, one glyph per key.
    pub fn render(&self, keys: &str) -> Vec<String> {
        keys.chars()
            .map(|ch| self.resolve(ch, is_shifted(ch)))
            .collect()
    }

    /// Which key produces `glyph`. The unshifted layer is preferred when both
    /// layers carry the same glyph.
    pub fn hint_for(&self, glyph: &str) -> Option<KeyHint> {
        if glyph == " " {
            return Some(KeyHint {
                key: ' ',
                shift: false,
                finger: qwerty_finger(' '),
            });
        }
        let unshifted = QWERTY
            .iter()
            .find(|k| self.resolve(k.base, false) == glyph)
            .map(|k| (k.base, false));
        let found = unshifted.or_else(|| {
            QWERTY
                .iter()
                .find(|k| self.resolve(k.shifted, true) == glyph)
                .map(|k| (k.shifted, true))
        });
        found.map(|(key, shift)| KeyHint {
            key,
            shift,
            finger: qwerty_finger(key),
        })
    }
}

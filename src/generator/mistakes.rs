use rand::RngCore;

use crate::generator::TextGenerator;
use crate::generator::drill::random_drill;
use crate::keyboard::keymap::Keymap;

/// Glyph count of a mistake drill when the configured drill length allows it.
pub const MISTAKE_DRILL_LENGTH: usize = 100;

/// Random drill over the keys behind previously mistyped glyphs.
pub struct MistakeDrill {
    pub keys: Vec<char>,
    pub length: usize,
}

impl MistakeDrill {
    /// Physical keys for `glyphs` under `keymap`. Spaces and glyphs the keymap
    /// cannot produce are skipped; each key appears once.
    pub fn from_glyphs<'a>(
        glyphs: impl IntoIterator<Item = &'a String>,
        keymap: &Keymap,
        length: usize,
    ) -> Self {
        let mut keys: Vec<char> = Vec::new();
        for glyph in glyphs {
            if glyph == " " {
                continue;
            }
            if let Some(hint) = keymap.hint_for(glyph)
                && !keys.contains(&hint.key)
            {
                keys.push(hint.key);
            }
        }
        Self { keys, length }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl TextGenerator for MistakeDrill {
    fn generate(&self, _level: u32, rng: &mut dyn RngCore) -> String {
        random_drill(&self.keys, self.length, rng)
    }
}

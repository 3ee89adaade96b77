use crate::engine::stage::Stage;
use crate::keyboard::keymap::LanguageMode;

/// Practice text for one level. Each glyph is what a single keystroke
/// produces in the lesson's language mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lesson {
    pub level: u32,
    pub stage: Stage,
    pub mode: LanguageMode,
    glyphs: Vec<String>,
}

impl Lesson {
    pub fn new(level: u32, mode: LanguageMode, glyphs: Vec<String>) -> Self {
        Self {
            level,
            stage: Stage::classify(level),
            mode,
            glyphs,
        }
    }

    /// Lesson made of one glyph per `char`, as in the primary mode.
    pub fn from_text(level: u32, mode: LanguageMode, text: &str) -> Self {
        Self::new(level, mode, text.chars().map(String::from).collect())
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyph(&self, idx: usize) -> Option<&str> {
        self.glyphs.get(idx).map(String::as_str)
    }

    pub fn glyphs(&self) -> &[String] {
        &self.glyphs
    }

    pub fn text(&self) -> String {
        self.glyphs.concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lesson() {
        let lesson = Lesson::from_text(3, LanguageMode::Primary, "asdf jkl;");
        assert_eq!(lesson.len(), 9);
        assert_eq!(lesson.stage, Stage::HomeRow);
        assert_eq!(lesson.glyph(4), Some(" "));
        assert_eq!(lesson.glyph(9), None);
        assert_eq!(lesson.text(), "asdf jkl;");
    }

    #[test]
    fn test_multi_codepoint_glyphs() {
        let glyphs = vec!["त्र".to_string(), "क".to_string()];
        let lesson = Lesson::new(30, LanguageMode::Alternate, glyphs);
        assert_eq!(lesson.len(), 2);
        assert_eq!(lesson.glyph(0), Some("त्र"));
        assert_eq!(lesson.text(), "त्रक");
    }
}

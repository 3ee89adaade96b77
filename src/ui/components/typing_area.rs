use std::collections::BTreeSet;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::attempt::Attempt;
use crate::session::lesson::Lesson;
use crate::ui::theme::Theme;

pub struct TypingArea<'a> {
    lesson: &'a Lesson,
    attempt: &'a Attempt,
    missed: bool,
    heatmap: &'a BTreeSet<String>,
    theme: &'a Theme,
}

impl<'a> TypingArea<'a> {
    pub fn new(
        lesson: &'a Lesson,
        attempt: &'a Attempt,
        missed: bool,
        heatmap: &'a BTreeSet<String>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            lesson,
            attempt,
            missed,
            heatmap,
            theme,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GlyphState {
    Typed,
    Cursor,
    Missed,
    Weak,
    Pending,
}

fn glyph_state(idx: usize, cursor: usize, missed: bool, weak: bool) -> GlyphState {
    if idx < cursor {
        GlyphState::Typed
    } else if idx == cursor && missed {
        GlyphState::Missed
    } else if idx == cursor {
        GlyphState::Cursor
    } else if weak {
        GlyphState::Weak
    } else {
        GlyphState::Pending
    }
}

/// Spaces at the cursor would be invisible without a marker.
fn display(glyph: &str, state: GlyphState) -> String {
    if glyph == " " && matches!(state, GlyphState::Cursor | GlyphState::Missed) {
        "\u{00b7}".to_string()
    } else {
        glyph.to_string()
    }
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let cursor = self.attempt.cursor();

        let spans: Vec<Span> = self
            .lesson
            .glyphs()
            .iter()
            .enumerate()
            .map(|(idx, glyph)| {
                let state = glyph_state(idx, cursor, self.missed, self.heatmap.contains(glyph));
                let style = match state {
                    GlyphState::Typed => Style::default().fg(colors.typed),
                    GlyphState::Cursor => Style::default()
                        .fg(colors.cursor_fg)
                        .bg(colors.cursor_bg),
                    GlyphState::Missed => Style::default()
                        .fg(colors.missed)
                        .bg(colors.missed_bg)
                        .add_modifier(Modifier::UNDERLINED),
                    GlyphState::Weak => Style::default()
                        .fg(colors.warning)
                        .add_modifier(Modifier::UNDERLINED),
                    GlyphState::Pending => Style::default().fg(colors.dim),
                };
                Span::styled(display(glyph, state), style)
            })
            .collect();

        let block = Block::bordered()
            .title(format!(" Level {} ", self.lesson.level))
            .border_style(Style::default().fg(colors.border))
            .style(Style::default().bg(colors.bg));

        Paragraph::new(Line::from(spans))
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_states() {
        assert_eq!(glyph_state(0, 2, false, false), GlyphState::Typed);
        assert_eq!(glyph_state(2, 2, false, true), GlyphState::Cursor);
        assert_eq!(glyph_state(2, 2, true, false), GlyphState::Missed);
        assert_eq!(glyph_state(3, 2, false, true), GlyphState::Weak);
        assert_eq!(glyph_state(3, 2, false, false), GlyphState::Pending);
    }

    #[test]
    fn test_space_marker_only_at_cursor() {
        assert_eq!(display(" ", GlyphState::Cursor), "\u{00b7}");
        assert_eq!(display(" ", GlyphState::Pending), " ");
        assert_eq!(display("क", GlyphState::Cursor), "क");
    }

    #[test]
    fn test_renders_multi_codepoint_glyphs() {
        let lesson = Lesson::new(
            30,
            crate::keyboard::keymap::LanguageMode::Alternate,
            vec!["त्र".to_string(), "क".to_string()],
        );
        let attempt = Attempt::new();
        let heatmap = BTreeSet::new();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        TypingArea::new(&lesson, &attempt, false, &heatmap, &theme).render(area, &mut buf);
        let row: String = (1..19).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains('क'));
    }
}

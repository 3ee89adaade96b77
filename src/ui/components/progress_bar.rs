use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

/// Lesson progress in glyphs, with a `typed/total` caption.
pub struct ProgressBar<'a> {
    pub label: String,
    pub typed: usize,
    pub total: usize,
    pub theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn new(label: &str, typed: usize, total: usize, theme: &'a Theme) -> Self {
        Self {
            label: label.to_string(),
            typed: typed.min(total),
            total,
            theme,
        }
    }

    fn filled(&self, width: u16) -> u16 {
        if self.total == 0 {
            return 0;
        }
        (self.typed * width as usize / self.total) as u16
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.label))
            .border_style(Style::default().fg(colors.border));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled = self.filled(inner.width);
        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled {
                Style::default().fg(colors.bg).bg(colors.bar_filled)
            } else {
                Style::default().fg(colors.fg).bg(colors.bar_empty)
            };
            buf[(x, inner.y)].set_style(style);
        }

        let caption = format!("{}/{}", self.typed, self.total);
        let caption_x = inner.x + (inner.width.saturating_sub(caption.len() as u16)) / 2;
        buf.set_string(caption_x, inner.y, &caption, Style::default().fg(colors.fg));
    }
}

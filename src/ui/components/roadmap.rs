use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::stage::Stage;
use crate::ui::theme::Theme;

/// Stage list with level ranges; the stage holding `selected` is highlighted
/// and the current level is marked.
pub struct Roadmap<'a> {
    pub current: u32,
    pub selected: u32,
    pub max_level: u32,
    pub theme: &'a Theme,
}

pub fn stage_rows(max_level: u32) -> Vec<(Stage, String)> {
    Stage::ALL
        .iter()
        .filter(|stage| stage.floor() <= max_level)
        .map(|&stage| {
            let range = stage.level_range(max_level);
            (stage, format!("{:>3}-{:<3}", range.start(), range.end()))
        })
        .collect()
}

impl Widget for Roadmap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let selected_stage = Stage::classify(self.selected);
        let current_stage = Stage::classify(self.current);

        let mut lines = vec![
            Line::from(Span::styled(
                format!("  Go to level {}  ({})", self.selected, selected_stage),
                Style::default()
                    .fg(colors.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];

        for (stage, range) in stage_rows(self.max_level) {
            let marker = if stage == current_stage { "\u{25b6}" } else { " " };
            let style = if stage == selected_stage {
                Style::default()
                    .fg(colors.bg)
                    .bg(colors.accent)
            } else if stage < current_stage {
                Style::default().fg(colors.success)
            } else {
                Style::default().fg(colors.fg)
            };
            lines.push(Line::from(Span::styled(
                format!(" {marker} {range}  {}", stage.name()),
                style,
            )));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "  [\u{2191}\u{2193}] level  [PgUp/PgDn] 10 levels  [Enter] start  [Esc] back",
            Style::default().fg(colors.dim),
        )));

        let block = Block::bordered()
            .title(" Roadmap ")
            .border_style(Style::default().fg(colors.border))
            .style(Style::default().bg(colors.bg));
        Paragraph::new(lines).block(block).render(area, buf);
    }
}

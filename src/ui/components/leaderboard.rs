use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Row, Table, Widget};

use crate::store::schema::LeaderboardEntry;
use crate::ui::theme::Theme;

pub struct Leaderboard<'a> {
    pub entries: &'a [LeaderboardEntry],
    pub theme: &'a Theme,
}

impl Widget for Leaderboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(" Leaderboard  [Esc] back ")
            .border_style(Style::default().fg(colors.border))
            .style(Style::default().bg(colors.bg));

        let header = Row::new(vec!["#", "Name", "Level", "WPM", "Acc"]).style(
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        );
        let rows: Vec<Row> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                Row::new(vec![
                    format!("{}", i + 1),
                    entry.display_name.clone(),
                    entry.level.to_string(),
                    entry.wpm.to_string(),
                    format!("{}%", entry.accuracy),
                ])
                .style(Style::default().fg(colors.fg))
            })
            .collect();

        if rows.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            buf.set_string(
                inner.x + 1,
                inner.y,
                "No rankings yet.",
                Style::default().fg(colors.dim),
            );
            return;
        }

        Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Min(12),
                Constraint::Length(6),
                Constraint::Length(5),
                Constraint::Length(5),
            ],
        )
        .header(header)
        .block(block)
        .render(area, buf);
    }
}

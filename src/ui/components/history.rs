use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Row, Table, Widget};

use crate::keyboard::keymap::Keymap;
use crate::session::result::AttemptResult;
use crate::ui::theme::Theme;

const RESET_PROMPT: &str = "Reset all progress and history? [y] yes, any other key cancels";

pub struct History<'a> {
    pub attempts: &'a [AttemptResult],
    pub keymap: &'a Keymap,
    pub reset_armed: bool,
    pub theme: &'a Theme,
}

/// Cells of one history row: level, wpm, accuracy, result, confusions, finger.
pub fn history_cells(result: &AttemptResult, keymap: &Keymap) -> [String; 6] {
    [
        format!("#{}", result.level),
        result.wpm.to_string(),
        format!("{}%", result.accuracy),
        if result.passed { "PASS" } else { "FAIL" }.to_string(),
        result.confusion_summary(),
        result
            .weakest_finger(keymap)
            .map_or_else(|| "None".to_string(), |finger| finger.to_string()),
    ]
}

impl Widget for History<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let title = if self.reset_armed {
            format!(" {RESET_PROMPT} ")
        } else {
            " Attempt History  [x] reset  [Esc] back ".to_string()
        };
        let border = if self.reset_armed {
            colors.error
        } else {
            colors.border
        };
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg));

        if self.attempts.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            buf.set_string(
                inner.x + 1,
                inner.y,
                "No attempts yet.",
                Style::default().fg(colors.dim),
            );
            return;
        }

        let header = Row::new(vec!["Level", "WPM", "Acc", "", "Errors", "Weak finger"]).style(
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        );
        let rows: Vec<Row> = self
            .attempts
            .iter()
            .map(|result| {
                let fg = if result.passed {
                    colors.success
                } else {
                    colors.missed
                };
                Row::new(history_cells(result, self.keymap)).style(Style::default().fg(fg))
            })
            .collect();

        Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Length(4),
                Constraint::Length(5),
                Constraint::Length(5),
                Constraint::Min(20),
                Constraint::Length(11),
            ],
        )
        .header(header)
        .block(block)
        .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::keymap::LanguageMode;
    use crate::session::attempt::Attempt;
    use crate::session::lesson::Lesson;
    use crate::session::stats::StatsSnapshot;

    fn failed_attempt() -> AttemptResult {
        let lesson = Lesson::from_text(33, LanguageMode::Primary, "qwer");
        let mut attempt = Attempt::new();
        attempt.record_error("q", "a");
        let stats = StatsSnapshot {
            wpm: 18,
            accuracy: 80,
            elapsed_secs: 4,
        };
        AttemptResult::from_attempt(&lesson, &attempt, stats, false)
    }

    #[test]
    fn row_shows_result_and_confusions() {
        let keymap = Keymap::identity();
        let cells = history_cells(&failed_attempt(), &keymap);
        assert_eq!(cells[0], "#33");
        assert_eq!(cells[1], "18");
        assert_eq!(cells[2], "80%");
        assert_eq!(cells[3], "FAIL");
        assert_eq!(cells[4], "'a' vs 'q' (1x)");
        assert_eq!(cells[5], keymap.hint_for("q").unwrap().finger.unwrap().to_string());
    }

    #[test]
    fn renders_rows_and_reset_prompt() {
        let theme = Theme::default();
        let attempts = [failed_attempt()];
        let area = Rect::new(0, 0, 90, 6);
        let mut buf = Buffer::empty(area);
        History {
            attempts: &attempts,
            keymap: &Keymap::identity(),
            reset_armed: true,
            theme: &theme,
        }
        .render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Reset all progress"));
        assert!(text.contains("#33"));
    }
}

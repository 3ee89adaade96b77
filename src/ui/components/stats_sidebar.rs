use std::collections::BTreeSet;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::engine::progression::Thresholds;
use crate::keyboard::keymap::KeyHint;
use crate::session::result::AttemptResult;
use crate::session::stats::StatsSnapshot;
use crate::ui::theme::Theme;

pub struct StatsSidebar<'a> {
    pub live: StatsSnapshot,
    pub thresholds: Thresholds,
    pub hint: Option<KeyHint>,
    pub last_result: Option<&'a AttemptResult>,
    pub heatmap: &'a BTreeSet<String>,
    pub theme: &'a Theme,
}

pub fn hint_text(hint: &KeyHint) -> String {
    let key = match hint.key {
        ' ' => "Space".to_string(),
        ch => ch.to_string(),
    };
    let finger = hint
        .finger
        .map(|f| f.to_string())
        .unwrap_or_else(|| "?".to_string());
    if hint.shift {
        format!("Shift+{key} ({finger})")
    } else {
        format!("{key} ({finger})")
    }
}

impl Widget for StatsSidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let label = Style::default().fg(colors.fg);
        let value = Style::default()
            .fg(colors.accent)
            .add_modifier(Modifier::BOLD);
        let row = |name: &str, text: String, style: Style| {
            Line::from(vec![
                Span::styled(format!("{name:<9}"), label),
                Span::styled(text, style),
            ])
        };

        let wpm_style = if self.live.wpm >= self.thresholds.target_wpm {
            Style::default().fg(colors.success)
        } else {
            value
        };
        let acc_style = if self.live.accuracy >= self.thresholds.target_accuracy {
            Style::default().fg(colors.success)
        } else {
            Style::default().fg(colors.warning)
        };

        let mut lines = vec![
            row("WPM", format!("{}", self.live.wpm), wpm_style),
            row("Accuracy", format!("{}%", self.live.accuracy), acc_style),
            row("Time", format!("{}s", self.live.elapsed_secs), value),
            row(
                "Target",
                format!(
                    "{} WPM / {}%",
                    self.thresholds.target_wpm, self.thresholds.target_accuracy
                ),
                label,
            ),
            Line::default(),
        ];

        if let Some(hint) = &self.hint {
            lines.push(row("Next", hint_text(hint), value));
            lines.push(Line::default());
        }

        if let Some(result) = self.last_result {
            let verdict = if result.passed {
                Span::styled("passed", Style::default().fg(colors.success))
            } else {
                Span::styled("repeat", Style::default().fg(colors.error))
            };
            lines.push(Line::from(vec![
                Span::styled(format!("Last: L{} ", result.level), label),
                verdict,
            ]));
            lines.push(row(
                "",
                format!("{} WPM, {}%", result.wpm, result.accuracy),
                label,
            ));
            for (expected, typed, count) in result.worst_confusions().into_iter().take(3) {
                lines.push(row(
                    "",
                    format!("{expected} -> {typed} x{count}"),
                    Style::default().fg(colors.error),
                ));
            }
        }

        if !self.heatmap.is_empty() {
            let weak: Vec<&str> = self.heatmap.iter().map(String::as_str).collect();
            lines.push(row("Weak", weak.join(" "), Style::default().fg(colors.warning)));
        }

        let block = Block::bordered()
            .title(" Stats ")
            .border_style(Style::default().fg(colors.border));
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

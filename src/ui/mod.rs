pub mod components;
pub mod layout;
pub mod theme;

use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use crate::app::{AppScreen, DrillKind, Session};
use crate::session::input::KeyOutcome;
use crate::ui::components::history::History;
use crate::ui::components::leaderboard::Leaderboard;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::components::roadmap::Roadmap;
use crate::ui::components::stats_sidebar::{StatsSidebar, hint_text};
use crate::ui::components::typing_area::TypingArea;
use crate::ui::layout::{AppLayout, centered_rect, pack_hint_lines};
use crate::ui::theme::Theme;

const FOOTER_HINTS: &[&str] = &[
    "[Esc] quit",
    "[^R] restart",
    "[^L] language",
    "[^G] roadmap",
    "[^B] leaderboard",
    "[^D] drill mistakes",
    "[^Y] history",
    "[^N/^P] level",
];

pub fn render(frame: &mut Frame, session: &Session, theme: &Theme) {
    let area = frame.area();
    let layout = AppLayout::new(area);
    let colors = &theme.colors;

    let focus = match session.drill_kind {
        DrillKind::Level => session.stage().to_string(),
        DrillKind::Mistakes => "Mistake Drill".to_string(),
    };
    let header = format!(
        " keyladder  Level {} \u{2022} {focus} \u{2022} {}   {} WPM  {}%  {}s",
        session.level,
        session.mode,
        session.live.wpm,
        session.live.accuracy,
        session.live.elapsed_secs,
    );
    frame.render_widget(
        Paragraph::new(header).style(
            Style::default()
                .fg(colors.header_fg)
                .bg(colors.header_bg)
                .add_modifier(Modifier::BOLD),
        ),
        layout.header,
    );

    let mut status = vec![Line::from(Span::styled(
        format!(" {}", session.status_line),
        Style::default().fg(colors.accent),
    ))];
    if let Some(coach) = &session.coach_line {
        status.push(Line::from(Span::styled(
            format!(" {coach}"),
            Style::default().fg(colors.dim),
        )));
    }
    frame.render_widget(Paragraph::new(status), layout.status);

    let missed = matches!(session.last_outcome, Some(KeyOutcome::Incorrect { .. }));
    frame.render_widget(
        TypingArea::new(
            &session.lesson,
            &session.attempt,
            missed,
            &session.last_heatmap,
            theme,
        ),
        layout.main,
    );

    if let Some(sidebar) = layout.sidebar {
        frame.render_widget(
            StatsSidebar {
                live: session.live,
                thresholds: session.thresholds,
                hint: session.next_hint(),
                last_result: session.last_result.as_ref(),
                heatmap: &session.last_heatmap,
                theme,
            },
            sidebar,
        );
    }

    let progress_label = match session.next_hint() {
        Some(hint) if layout.sidebar.is_none() => format!("Progress \u{2022} next {}", hint_text(&hint)),
        _ => "Progress".to_string(),
    };
    frame.render_widget(
        ProgressBar::new(
            &progress_label,
            session.attempt.cursor(),
            session.lesson.len(),
            theme,
        ),
        layout.progress,
    );

    let footer = pack_hint_lines(FOOTER_HINTS, layout.footer.width as usize)
        .into_iter()
        .next()
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(footer).style(Style::default().fg(colors.dim)),
        layout.footer,
    );

    match session.screen {
        AppScreen::Drill => {}
        AppScreen::Roadmap => {
            let popup = centered_rect(60, 70, area);
            frame.render_widget(Clear, popup);
            frame.render_widget(
                Roadmap {
                    current: session.level,
                    selected: session.roadmap_selected,
                    max_level: session.config.max_level,
                    theme,
                },
                popup,
            );
        }
        AppScreen::Leaderboard => {
            let popup = centered_rect(60, 70, area);
            frame.render_widget(Clear, popup);
            frame.render_widget(
                Leaderboard {
                    entries: &session.leaderboard,
                    theme,
                },
                popup,
            );
        }
        AppScreen::History => {
            let popup = centered_rect(80, 70, area);
            frame.render_widget(Clear, popup);
            frame.render_widget(
                History {
                    attempts: &session.history,
                    keymap: &session.keymap,
                    reset_armed: session.reset_armed,
                    theme,
                },
                popup,
            );
        }
    }
}

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use keyladder::app::{AppScreen, Session};
use keyladder::config::Config;
use keyladder::engine::progression::Thresholds;
use keyladder::event::{AppEvent, EventHandler, key_input};
use keyladder::keyboard::keymap::LanguageMode;
use keyladder::ui;
use keyladder::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "keyladder", version, about = "Level-based terminal typing tutor")]
struct Cli {
    #[arg(short, long, help = "Start at this level")]
    level: Option<u32>,

    #[arg(long, help = "Language mode (en, ne)")]
    language: Option<String>,

    #[arg(long, help = "Words per minute needed to pass a level")]
    target_wpm: Option<u32>,

    #[arg(long, help = "Accuracy percentage needed to pass a level")]
    target_accuracy: Option<u32>,

    #[arg(long, help = "Print the leaderboard and exit")]
    leaderboard: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let mut config = Config::load()?;
    if let Some(language) = &cli.language {
        if LanguageMode::from_key(language).is_none() {
            anyhow::bail!("unknown language {language:?} (expected en or ne)");
        }
        config.language = language.clone();
    }
    config.normalize();

    let mut session = Session::new(config);
    if let Some(level) = cli.level {
        session.select_level(level);
    }
    if cli.target_wpm.is_some() || cli.target_accuracy.is_some() {
        let current = session.thresholds;
        session.set_thresholds(Thresholds::new(
            cli.target_wpm.unwrap_or(current.target_wpm),
            cli.target_accuracy.unwrap_or(current.target_accuracy),
        ));
    }

    if cli.leaderboard {
        print_leaderboard(&mut session);
        return Ok(());
    }

    let theme = Theme::default();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(session.config.tick_ms));
    let result = run_app(&mut terminal, &mut session, &theme, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Log to a file under the data directory; the terminal belongs to the UI.
fn init_logging() {
    let dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("keyladder");
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("keyladder.log"))
    else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn print_leaderboard(session: &mut Session) {
    session.refresh_leaderboard();
    if session.leaderboard.is_empty() {
        println!("No rankings yet.");
        return;
    }
    println!("{:>3}  {:<20} {:>5} {:>5} {:>5}", "#", "Name", "Level", "WPM", "Acc");
    for (i, entry) in session.leaderboard.iter().enumerate() {
        println!(
            "{:>3}  {:<20} {:>5} {:>5} {:>4}%",
            i + 1,
            entry.display_name,
            entry.level,
            entry.wpm,
            entry.accuracy
        );
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut Session,
    theme: &Theme,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, session, theme))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(session, key),
            AppEvent::Tick => session.tick(Instant::now()),
            AppEvent::Resize => {}
        }

        if session.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(session: &mut Session, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        session.should_quit = true;
        return;
    }

    match session.screen {
        AppScreen::Drill => handle_drill_key(session, key),
        AppScreen::Roadmap => handle_roadmap_key(session, key),
        AppScreen::Leaderboard => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                session.go_to_drill();
            }
        }
        AppScreen::History => handle_history_key(session, key),
    }
}

fn handle_drill_key(session: &mut Session, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        session.should_quit = true;
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.kind == KeyEventKind::Press {
        match key.code {
            KeyCode::Char('r') => session.restart(),
            KeyCode::Char('l') => session.toggle_language(),
            KeyCode::Char('g') => session.go_to_roadmap(),
            KeyCode::Char('b') => session.go_to_leaderboard(),
            KeyCode::Char('y') => session.go_to_history(),
            KeyCode::Char('d') => {
                session.start_mistake_drill();
            }
            KeyCode::Char('n') => session.select_level(session.level + 1),
            KeyCode::Char('p') => session.select_level(session.level.saturating_sub(1)),
            _ => {}
        }
        return;
    }

    if let Some(input) = key_input(&key) {
        session.handle_key(&input, Instant::now());
    }
}

fn handle_roadmap_key(session: &mut Session, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => session.go_to_drill(),
        KeyCode::Up | KeyCode::Char('k') => session.roadmap_move(-1),
        KeyCode::Down | KeyCode::Char('j') => session.roadmap_move(1),
        KeyCode::PageUp => session.roadmap_move(-10),
        KeyCode::PageDown => session.roadmap_move(10),
        KeyCode::Home => session.roadmap_move(-i64::from(session.config.max_level)),
        KeyCode::End => session.roadmap_move(i64::from(session.config.max_level)),
        KeyCode::Enter => session.confirm_roadmap(),
        _ => {}
    }
}

fn handle_history_key(session: &mut Session, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => session.go_to_drill(),
        KeyCode::Char('x') if !session.reset_armed => session.request_reset(),
        KeyCode::Char('y') if session.reset_armed => {
            session.confirm_reset();
            session.go_to_drill();
        }
        _ => session.cancel_reset(),
    }
}

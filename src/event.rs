use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode,
};

use crate::keyboard::layout::is_shifted;
use crate::session::input::{Key, KeyInput, NamedKey};

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize,
}

/// Reads terminal events on a helper thread and emits a tick whenever no
/// event arrives within `tick_rate`.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    _tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let _tx = tx.clone();

        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    let forwarded = match event::read() {
                        Ok(Event::Key(key)) => tx.send(AppEvent::Key(key)),
                        Ok(Event::Resize(_, _)) => tx.send(AppEvent::Resize),
                        _ => Ok(()),
                    };
                    if forwarded.is_err() {
                        return;
                    }
                } else if tx.send(AppEvent::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx, _tx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}

/// Translate a crossterm key event into scoring input. Release events have
/// no counterpart and yield `None`.
pub fn key_input(key: &KeyEvent) -> Option<KeyInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let code = match key.code {
        KeyCode::Char(ch) => Key::Char(ch),
        KeyCode::Tab | KeyCode::BackTab => Key::Named(NamedKey::Tab),
        KeyCode::Backspace => Key::Named(NamedKey::Backspace),
        KeyCode::Esc => Key::Named(NamedKey::Escape),
        KeyCode::Enter => Key::Named(NamedKey::Enter),
        KeyCode::CapsLock => Key::Named(NamedKey::CapsLock),
        KeyCode::F(n) => Key::Named(NamedKey::F(n)),
        KeyCode::Left => Key::Named(NamedKey::Left),
        KeyCode::Right => Key::Named(NamedKey::Right),
        KeyCode::Up => Key::Named(NamedKey::Up),
        KeyCode::Down => Key::Named(NamedKey::Down),
        KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) => {
            Key::Named(NamedKey::Shift)
        }
        _ => Key::Named(NamedKey::Other),
    };
    let shift = key.modifiers.contains(KeyModifiers::SHIFT)
        || matches!(code, Key::Char(ch) if is_shifted(ch));
    Some(KeyInput {
        key: code,
        shift,
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        alt: key.modifiers.contains(KeyModifiers::ALT),
        meta: key
            .modifiers
            .intersects(KeyModifiers::SUPER | KeyModifiers::META),
        repeat: key.kind == KeyEventKind::Repeat,
    })
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;

    fn event(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_plain_char() {
        let input = key_input(&event(KeyCode::Char('f'), KeyModifiers::NONE, KeyEventKind::Press))
            .unwrap();
        assert_eq!(input, KeyInput::char('f'));
    }

    #[test]
    fn test_shifted_char_without_modifier_flag() {
        let input = key_input(&event(KeyCode::Char('A'), KeyModifiers::NONE, KeyEventKind::Press))
            .unwrap();
        assert!(input.shift);
    }

    #[test]
    fn test_release_is_dropped_and_repeat_flagged() {
        assert!(
            key_input(&event(KeyCode::Char('a'), KeyModifiers::NONE, KeyEventKind::Release))
                .is_none()
        );
        let repeat = key_input(&event(KeyCode::Char('a'), KeyModifiers::NONE, KeyEventKind::Repeat))
            .unwrap();
        assert!(repeat.repeat);
        assert_eq!(repeat.scorable_char(), None);
    }

    #[test]
    fn test_named_and_modified_keys() {
        let backspace =
            key_input(&event(KeyCode::Backspace, KeyModifiers::NONE, KeyEventKind::Press)).unwrap();
        assert_eq!(backspace.key, Key::Named(NamedKey::Backspace));
        let ctrl = key_input(&event(KeyCode::Char('r'), KeyModifiers::CONTROL, KeyEventKind::Press))
            .unwrap();
        assert!(ctrl.ctrl);
        assert_eq!(ctrl.scorable_char(), None);
    }
}

use std::time::Instant;

use crate::keyboard::keymap::Keymap;
use crate::session::attempt::{Attempt, AttemptState};
use crate::session::lesson::Lesson;
use crate::session::stats::{StatsSnapshot, derive_stats};

/// Non-printable keys. None of them ever reaches scoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NamedKey {
    Tab,
    Backspace,
    Escape,
    Shift,
    CapsLock,
    Enter,
    F(u8),
    Left,
    Right,
    Up,
    Down,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Named(NamedKey),
}

/// One key-down event as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    pub repeat: bool,
}

impl KeyInput {
    pub fn char(ch: char) -> Self {
        Self {
            key: Key::Char(ch),
            shift: false,
            ctrl: false,
            alt: false,
            meta: false,
            repeat: false,
        }
    }

    pub fn named(key: NamedKey) -> Self {
        Self {
            key: Key::Named(key),
            ..Self::char(' ')
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn as_repeat(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// The printable character this event carries, if scoring should see it.
    pub fn scorable_char(&self) -> Option<char> {
        if self.ctrl || self.alt || self.meta || self.repeat {
            return None;
        }
        match self.key {
            Key::Char(ch) if !ch.is_control() => Some(ch),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Correct,
    Incorrect { expected: String, typed: String },
    Completed(StatsSnapshot),
}

/// Apply one keystroke to `attempt`. The cursor only moves on a match; the
/// final matching glyph freezes the clock and yields the final stats.
pub fn process_key(
    attempt: &mut Attempt,
    lesson: &Lesson,
    keymap: &Keymap,
    input: &KeyInput,
    now: Instant,
) -> KeyOutcome {
    let Some(raw) = input.scorable_char() else {
        return KeyOutcome::Ignored;
    };
    if attempt.state() == AttemptState::Completed {
        return KeyOutcome::Ignored;
    }
    let Some(expected) = lesson.glyph(attempt.cursor()) else {
        return KeyOutcome::Ignored;
    };

    if attempt.started_at.is_none() {
        attempt.started_at = Some(now);
    }

    let typed = keymap.resolve(raw, input.shift);
    if typed != expected {
        attempt.incorrect += 1;
        attempt.record_error(expected, &typed);
        return KeyOutcome::Incorrect {
            expected: expected.to_string(),
            typed,
        };
    }

    attempt.typed.push(typed);
    attempt.correct += 1;

    if attempt.cursor() >= lesson.len() {
        attempt.finished_at = Some(now);
        return KeyOutcome::Completed(derive_stats(attempt, now));
    }
    KeyOutcome::Correct
}

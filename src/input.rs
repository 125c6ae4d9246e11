use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::session::Keystroke;

/// Everything the app reacts to from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Character(char),
    Backspace,
    WordBackspace,
    IncreaseUnlocked,
    DecreaseUnlocked,
    Restart,
    Retry,
    Quit,
}

impl InputEvent {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Esc => Some(InputEvent::Quit),
            KeyCode::Backspace if ctrl || alt => Some(InputEvent::WordBackspace),
            KeyCode::Backspace => Some(InputEvent::Backspace),
            KeyCode::Char(c) if ctrl => match c {
                'c' => Some(InputEvent::Quit),
                'r' => Some(InputEvent::Restart),
                't' => Some(InputEvent::Retry),
                // terminals commonly deliver ctrl+backspace as ctrl+h
                'h' | 'w' => Some(InputEvent::WordBackspace),
                _ => None,
            },
            KeyCode::Char('+') | KeyCode::Char('=') => Some(InputEvent::IncreaseUnlocked),
            KeyCode::Char('-') => Some(InputEvent::DecreaseUnlocked),
            KeyCode::Char(c) => Some(InputEvent::Character(c)),
            _ => None,
        }
    }

    /// The session edit this event stands for, if any.
    pub fn keystroke(self) -> Option<Keystroke> {
        match self {
            InputEvent::Character(c) => Some(Keystroke::Character(c)),
            InputEvent::Backspace => Some(Keystroke::Backspace),
            InputEvent::WordBackspace => Some(Keystroke::WordBackspace),
            _ => None,
        }
    }
}

//! Input processing layer: key mapping. Pure logic, no I/O.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions produced by key input processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Action {
    Quit,
    /// Re-roll the background within the current hour's category.
    Repick,
}

pub(super) fn map_key(key: KeyEvent) -> Option<Action> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Some(Action::Quit),
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),
        (KeyCode::Char('r'), KeyModifiers::NONE)
        | (KeyCode::Char(' '), KeyModifiers::NONE) => Some(Action::Repick),
        _ => None,
    }
}

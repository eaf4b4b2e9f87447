//! Keystroke decoding.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::sort::SortField;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Switch the active sort field and refresh immediately.
    Sort(SortField),
}

/// Maps a key event to an action.
///
/// Any character that is not a quit command is treated as a sort-key
/// attempt; unrecognized characters fall back to the default sort field.
pub fn handle_key(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char(c) => KeyAction::Sort(SortField::from_key(c)),
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn q_quits_in_both_cases() {
        assert_eq!(handle_key(press('q')), KeyAction::Quit);
        assert_eq!(handle_key(press('Q')), KeyAction::Quit);
    }

    #[test]
    fn ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(key), KeyAction::Quit);
    }

    #[test]
    fn plain_c_sorts_by_cache_size() {
        assert_eq!(handle_key(press('c')), KeyAction::Sort(SortField::CacheSize));
    }

    #[test]
    fn sort_keys_map_through_the_controller() {
        assert_eq!(handle_key(press('u')), KeyAction::Sort(SortField::Utilization));
        assert_eq!(handle_key(press('n')), KeyAction::Sort(SortField::Name));
        // unrecognized characters fall back to the default field
        assert_eq!(handle_key(press('x')), KeyAction::Sort(SortField::Objects));
    }

    #[test]
    fn non_character_keys_are_ignored() {
        let key = KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE);
        assert_eq!(handle_key(key), KeyAction::None);
        let key = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(handle_key(key), KeyAction::None);
    }
}

//! Key mapping from terminal events to input events.

use crate::types::InputEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to an input event.
pub fn map_key_event(key: KeyEvent) -> InputEvent {
    if should_quit(key) {
        return InputEvent::Quit;
    }

    match key.code {
        KeyCode::Char(' ')
        | KeyCode::Up
        | KeyCode::Enter
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('k')
        | KeyCode::Char('K') => InputEvent::Jump,
        _ => InputEvent::Other,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_jump_keys() {
        for code in [
            KeyCode::Char(' '),
            KeyCode::Up,
            KeyCode::Enter,
            KeyCode::Char('w'),
            KeyCode::Char('K'),
        ] {
            assert_eq!(map_key_event(KeyEvent::from(code)), InputEvent::Jump);
        }
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('Q'))),
            InputEvent::Quit
        );
    }

    #[test]
    fn test_other_keys() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('x'))),
            InputEvent::Other
        );
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Left)), InputEvent::Other);
    }
}

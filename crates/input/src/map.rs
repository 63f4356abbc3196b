//! Key mapping from terminal events to game input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::cursor::CursorMove;
use crate::types::{Command, Difficulty};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Move the grid cursor
    Cursor(CursorMove),
    /// Click the cell under the cursor
    Whack,
    /// A command that does not depend on the cursor
    Command(Command),
}

/// Map keyboard input to a game input.
pub fn handle_key_event(key: KeyEvent) -> Option<KeyAction> {
    match key.code {
        // Cursor
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(KeyAction::Cursor(CursorMove::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(KeyAction::Cursor(CursorMove::Down))
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(KeyAction::Cursor(CursorMove::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(KeyAction::Cursor(CursorMove::Right))
        }

        KeyCode::Char(' ') | KeyCode::Enter => Some(KeyAction::Whack),

        // Round
        KeyCode::Char('g') | KeyCode::Char('G') => Some(KeyAction::Command(Command::Start)),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(KeyAction::Command(Command::Reset)),

        // Settings
        KeyCode::Char('+') | KeyCode::Char('=') => Some(KeyAction::Command(Command::GrowGrid)),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(KeyAction::Command(Command::ShrinkGrid)),
        KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(KeyAction::Command(Command::CycleDifficulty))
        }
        KeyCode::Char('1') => Some(KeyAction::Command(Command::SetDifficulty(Difficulty::Easy))),
        KeyCode::Char('2') => Some(KeyAction::Command(Command::SetDifficulty(Difficulty::Medium))),
        KeyCode::Char('3') => Some(KeyAction::Command(Command::SetDifficulty(Difficulty::Hard))),

        _ => None,
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
    fn test_cursor_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(KeyAction::Cursor(CursorMove::Left))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('j'))),
            Some(KeyAction::Cursor(CursorMove::Down))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('K'))),
            Some(KeyAction::Cursor(CursorMove::Up))
        );
    }

    #[test]
    fn test_whack_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(KeyAction::Whack)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(KeyAction::Whack)
        );
    }

    #[test]
    fn test_round_and_settings_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('g'))),
            Some(KeyAction::Command(Command::Start))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('r'))),
            Some(KeyAction::Command(Command::Reset))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('+'))),
            Some(KeyAction::Command(Command::GrowGrid))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('3'))),
            Some(KeyAction::Command(Command::SetDifficulty(Difficulty::Hard)))
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
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
    }
}

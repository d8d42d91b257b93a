//! Key mapping from terminal events to player commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to a command.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Cursor
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(Command::MoveUp),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(Command::MoveDown),
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(Command::MoveRight),

        // Actions
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Confirm),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(Command::NewRound),
        KeyCode::Esc
        | KeyCode::Char('m')
        | KeyCode::Char('M')
        | KeyCode::Char('b')
        | KeyCode::Char('B') => Some(Command::BackToMenu),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_cursor_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Up)), Some(Command::MoveUp));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Down)), Some(Command::MoveDown));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Left)), Some(Command::MoveLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Right)), Some(Command::MoveRight));

        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('K'))), Some(Command::MoveUp));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('j'))), Some(Command::MoveDown));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('a'))), Some(Command::MoveLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('D'))), Some(Command::MoveRight));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Enter)), Some(Command::Confirm));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char(' '))), Some(Command::Confirm));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('n'))), Some(Command::NewRound));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Esc)), Some(Command::BackToMenu));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('M'))), Some(Command::BackToMenu));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_control_chords_are_not_commands() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}

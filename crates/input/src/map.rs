//! Key mapping from terminal events to game keys.

use crate::types::GameKey;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game keys.
pub fn map_key(key: KeyEvent) -> Option<GameKey> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GameKey::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameKey::Right)
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(GameKey::Up)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GameKey::Down)
        }

        // Screens
        KeyCode::Char(' ') | KeyCode::Enter => Some(GameKey::Start),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameKey::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

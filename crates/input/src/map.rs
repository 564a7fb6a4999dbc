//! Key mapping from terminal events to UI commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::cursor::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    Move(Direction),
    /// Pick the card under the cursor.
    Flip,
    Start,
    Reset,
    RefreshScores,
}

/// Map keyboard input to UI commands.
pub fn handle_key_event(key: KeyEvent) -> Option<UiCommand> {
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(UiCommand::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(UiCommand::Move(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(UiCommand::Move(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(UiCommand::Move(Direction::Down)),

        // Actions
        KeyCode::Char(' ') | KeyCode::Enter => Some(UiCommand::Flip),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(UiCommand::Start),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(UiCommand::Reset),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(UiCommand::RefreshScores),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

//! Player-name editor for the completion prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub const MAX_NAME_LEN: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryEvent {
    Edited,
    /// Enter pressed; carries the trimmed name (may be empty).
    Submit(String),
    Cancel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameEntry {
    text: String,
}

impl NameEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<EntryEvent> {
        match key.code {
            KeyCode::Enter => Some(EntryEvent::Submit(self.text.trim().to_string())),
            KeyCode::Esc => Some(EntryEvent::Cancel),
            KeyCode::Backspace => self.text.pop().map(|_| EntryEvent::Edited),
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => None,
            KeyCode::Char(ch) if !ch.is_control() => {
                if self.text.chars().count() >= MAX_NAME_LEN {
                    return None;
                }
                self.text.push(ch);
                Some(EntryEvent::Edited)
            }
            _ => None,
        }
    }
}

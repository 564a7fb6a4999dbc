//! Terminal input module.
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`UiCommand`]s, tracks the card cursor, and
//! edits the player name after a finished game.

pub mod cursor;
pub mod map;
pub mod name_entry;

pub use memory_match_types as types;

pub use cursor::{Direction, GridCursor};
pub use map::{handle_key_event, should_quit, UiCommand};
pub use name_entry::{EntryEvent, NameEntry, MAX_NAME_LEN};

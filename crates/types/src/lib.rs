//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, score persistence).
//!
//! # Deck Dimensions
//!
//! The classic layout uses eight symbols, two cards each:
//!
//! - **Pairs**: 8
//! - **Cards**: 16, laid out as a 4x4 grid
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Frontend loop interval (~60 FPS) |
//! | `CLOCK_TICK_MS` | 1000 | Granularity of the elapsed-time counter |
//! | `MATCH_REVEAL_MS` | 300 | Delay before a matched pair takes the matched style |
//! | `MISMATCH_REVEAL_MS` | 1000 | How long a mismatched pair stays face up |
//! | `COMPLETION_NOTICE_MS` | 500 | Delay before the completion prompt is announced |
//!
//! # Scoring
//!
//! ```text
//! score = max(0, 1000 + max(0, 300 - secs) * 2 - moves * 10 + pairs * 100)
//! ```
//!
//! # Examples
//!
//! ```
//! use memory_match_types::{Phase, Symbol, DECK_SIZE, PAIR_COUNT};
//!
//! assert_eq!(Symbol::ALL.len(), PAIR_COUNT);
//! assert_eq!(DECK_SIZE, 16);
//!
//! assert_eq!(Symbol::Fox.as_str(), "fox");
//! assert!(!Phase::Resolving.accepts_picks());
//! ```

/// Number of distinct symbols in the classic deck.
pub const PAIR_COUNT: usize = 8;

/// Number of cards in the classic deck (two per symbol).
pub const DECK_SIZE: usize = PAIR_COUNT * 2;

/// Grid columns used by the terminal layout.
pub const GRID_COLUMNS: usize = 4;

/// Frontend loop interval in milliseconds (16ms ≈ 60 FPS).
pub const FRAME_MS: u32 = 16;

/// Elapsed-time granularity (one tick per second).
pub const CLOCK_TICK_MS: u32 = 1000;

/// Delay before a resolved match is shown with the matched style.
pub const MATCH_REVEAL_MS: u32 = 300;

/// How long a mismatched pair stays revealed before flipping back.
pub const MISMATCH_REVEAL_MS: u32 = 1000;

/// Delay between completion and the completion announcement.
pub const COMPLETION_NOTICE_MS: u32 = 500;

/// Starting points before bonuses and penalties.
pub const BASE_SCORE: u32 = 1000;

/// Seconds during which the time bonus is still positive.
pub const TIME_BONUS_WINDOW_SECS: u32 = 300;

/// Points per second left in the time-bonus window.
pub const TIME_BONUS_PER_SEC: u32 = 2;

/// Points lost per move (one move = two picks).
pub const MOVE_PENALTY: u32 = 10;

/// Points per matched pair.
pub const MATCH_BONUS: u32 = 100;

/// Number of records kept on the leaderboard.
pub const LEADERBOARD_LIMIT: usize = 10;

/// Stable card index within a deck (0-based, position at deal time).
pub type CardId = usize;

/// The fixed symbol set.
///
/// Each symbol appears on exactly two cards of a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Dog,
    Cat,
    Mouse,
    Hamster,
    Rabbit,
    Fox,
    Bear,
    Panda,
}

impl Symbol {
    /// All symbols in declaration order.
    pub const ALL: [Symbol; PAIR_COUNT] = [
        Symbol::Dog,
        Symbol::Cat,
        Symbol::Mouse,
        Symbol::Hamster,
        Symbol::Rabbit,
        Symbol::Fox,
        Symbol::Bear,
        Symbol::Panda,
    ];

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::Dog => "dog",
            Symbol::Cat => "cat",
            Symbol::Mouse => "mouse",
            Symbol::Hamster => "hamster",
            Symbol::Rabbit => "rabbit",
            Symbol::Fox => "fox",
            Symbol::Bear => "bear",
            Symbol::Panda => "panda",
        }
    }

    /// Single-column face shown on the card.
    pub fn letter(&self) -> char {
        match self {
            Symbol::Dog => 'D',
            Symbol::Cat => 'C',
            Symbol::Mouse => 'M',
            Symbol::Hamster => 'H',
            Symbol::Rabbit => 'R',
            Symbol::Fox => 'F',
            Symbol::Bear => 'B',
            Symbol::Panda => 'P',
        }
    }
}

/// Lifecycle phase of a session.
///
/// `Resolving` only lasts for the mismatch reveal window; matches resolve
/// immediately after the second pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    AwaitingFirstPick,
    AwaitingSecondPick,
    Resolving,
    Completed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::AwaitingFirstPick => "awaitingFirstPick",
            Phase::AwaitingSecondPick => "awaitingSecondPick",
            Phase::Resolving => "resolving",
            Phase::Completed => "completed",
        }
    }

    /// Whether picks can currently be accepted (selection guard aside).
    pub fn accepts_picks(&self) -> bool {
        matches!(self, Phase::AwaitingFirstPick | Phase::AwaitingSecondPick)
    }
}

/// Game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Start,
    Reset,
    Pick(CardId),
}

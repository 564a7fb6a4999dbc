//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the memory-matching rules, session state management, and
//! timing logic. It has **no dependencies** on terminal I/O or persistence, making it:
//!
//! - **Deterministic**: Same seed produces an identical deal
//! - **Testable**: Every transition can be driven with `handle_pick` and `advance`
//! - **Portable**: Can run behind any frontend (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`deck`]: Card type and the shuffled deck builder
//! - [`rng`]: Seeded RNG and Fisher-Yates shuffle
//! - [`session`]: [`GameSession`] state machine (start, pick, resolve, reset)
//! - [`clock`]: Elapsed-time counter and time formatting
//! - [`schedule`]: Generation-tagged deferred actions (reveal delays)
//! - [`scoring`]: Score formula
//! - [`events`]: Observer notifications emitted by the session
//! - [`snapshot`]: Render-facing copy of the session
//!
//! # Example
//!
//! ```
//! use memory_match_core::{GameSession, PickOutcome};
//!
//! let mut session = GameSession::new(7);
//! session.start();
//!
//! let first = session.cards()[0];
//! let twin = session
//!     .cards()
//!     .iter()
//!     .find(|c| c.id() != first.id() && c.symbol() == first.symbol())
//!     .map(|c| c.id())
//!     .unwrap();
//!
//! assert_eq!(session.handle_pick(first.id()), PickOutcome::Flipped);
//! assert_eq!(session.handle_pick(twin), PickOutcome::Matched { completed: false });
//! assert_eq!(session.matched_pairs(), 1);
//! assert_eq!(session.moves(), 1);
//! ```
//!
//! # Timing
//!
//! The session does not own a timer thread. Frontends call
//! [`GameSession::advance`](session::GameSession::advance) with the elapsed
//! milliseconds since the previous frame; that single call drives the
//! elapsed-seconds counter and any reveal delays that have come due.

pub mod clock;
pub mod deck;
pub mod events;
pub mod rng;
pub mod schedule;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use memory_match_types as types;

// Re-export commonly used types for convenience
pub use clock::{format_clock, format_duration, SessionClock};
pub use deck::{build_deck, Card};
pub use events::{SessionEvent, SessionObserver};
pub use rng::DeckRng;
pub use schedule::{DeferredAction, Scheduler};
pub use scoring::{calculate_score, ScoreBreakdown};
pub use session::{ConfigError, GameResult, GameSession, PickOutcome, SessionConfig};
pub use snapshot::{CardFace, CardSnapshot, SessionSnapshot};

//! Terminal rendering for the card table.
//!
//! Rendering goes through a plain framebuffer rather than a widget library:
//! [`BoardView`] paints a snapshot into a [`FrameBuffer`], and
//! [`TerminalRenderer`] flushes only the cells that changed.

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use memory_match_core as core;
pub use memory_match_types as types;

pub use board_view::{AnchorY, BoardView, Hud, ScoreRow, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};

//! Memory Match (workspace facade crate).
//!
//! Re-exports the workspace crates under one name and hosts [`app`], the
//! frontend state machine the binary drives.

pub mod app;

pub use memory_match_core as core;
pub use memory_match_input as input;
pub use memory_match_store as store;
pub use memory_match_term as term;
pub use memory_match_types as types;

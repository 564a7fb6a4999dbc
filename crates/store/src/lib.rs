//! Score store - persistence and ranking of completed games
//!
//! The game engine hands finished results to a [`ScoreStore`]. Two backends
//! implement it:
//!
//! - [`RemoteStore`]: a hosted PostgREST table (Supabase-compatible) reached over HTTPS
//! - [`LocalStore`]: a JSON file holding the top 10 records on this machine
//!
//! [`Leaderboard`] picks one at startup (no credential or failed probe means
//! local) and downgrades to the local store for the rest of the session if the
//! remote one becomes unreachable.
//!
//! # Wire contract
//!
//! ```text
//! POST  {url}/rest/v1/game_scores        body: [{player_name, score, game_duration_seconds,
//!                                                attempts, matched_pairs, total_pairs}]
//!                                         header: Prefer: return=representation
//! GET   {url}/rest/v1/game_scores?select=*&order=score.desc&limit=10
//! ```
//!
//! # Environment Variables
//!
//! - `MEMORY_MATCH_STORE_URL` (or `SUPABASE_URL`): store endpoint
//! - `MEMORY_MATCH_STORE_KEY` (or `SUPABASE_ANON_KEY`): access credential
//! - `MEMORY_MATCH_STORE_TABLE`: table name (default `game_scores`)
//! - `MEMORY_MATCH_STORE_TIMEOUT_MS`: request timeout (default 5000)
//! - `MEMORY_MATCH_SCORES_PATH`: local fallback file
//! - `MEMORY_MATCH_OFFLINE`: set to "1" or "true" to skip the remote store
//!
//! # Threading
//!
//! The game loop is synchronous. [`StoreRuntime`] owns a tokio runtime and
//! serves requests over channels so persistence never blocks input handling.

pub mod config;
pub mod error;
pub mod leaderboard;
pub mod local;
pub mod record;
pub mod remote;
pub mod runtime;
pub mod store;

pub use memory_match_core as core;
pub use memory_match_types as types;

pub use config::{RemoteConfig, StoreConfig};
pub use error::StoreError;
pub use leaderboard::{Leaderboard, SaveOutcome};
pub use local::LocalStore;
pub use record::{rank_records, NewScore, ScoreRecord};
pub use remote::RemoteStore;
pub use runtime::{StoreReply, StoreRequest, StoreRuntime};
pub use store::{Backend, ScoreStore};

use async_trait::async_trait;

use crate::error::StoreError;
use crate::record::{NewScore, ScoreRecord};

/// Which implementation is serving requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Remote,
    Local,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Remote => "remote",
            Backend::Local => "local",
        }
    }

    /// Upper-case name for status panels.
    pub fn label(&self) -> &'static str {
        match self {
            Backend::Remote => "REMOTE",
            Backend::Local => "LOCAL",
        }
    }
}

/// Persists completed games and lists the best ones.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Insert one record, returning it as stored.
    async fn save(&self, score: &NewScore) -> Result<ScoreRecord, StoreError>;

    /// Up to `limit` records, best score first.
    async fn list_top(&self, limit: usize) -> Result<Vec<ScoreRecord>, StoreError>;

    fn backend(&self) -> Backend;
}

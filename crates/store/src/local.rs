//! Local fallback store: the top records kept in a JSON file on this machine.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::StoreError;
use crate::record::{rank_records, NewScore, ScoreRecord};
use crate::store::{Backend, ScoreStore};
use crate::types::LEADERBOARD_LIMIT;

#[derive(Debug)]
pub struct LocalStore {
    path: Option<PathBuf>,
    records: Mutex<Vec<ScoreRecord>>,
}

impl LocalStore {
    /// Records live only as long as this value.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Load the ranked list from `path`. A missing file is an empty list.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => {
                let mut records: Vec<ScoreRecord> = serde_json::from_slice(&bytes)
                    .map_err(|e| StoreError::Corrupt(format!("{}: {e}", path.display())))?;
                rank_records(&mut records, LEADERBOARD_LIMIT);
                records
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), count = records.len(), "local scores loaded");

        Ok(Self {
            path: Some(path),
            records: Mutex::new(records),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    async fn persist(&self, records: &[ScoreRecord]) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        let bytes = serde_json::to_vec_pretty(records)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        // Write-then-rename: the file on disk is always a complete list.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

fn next_id(now: OffsetDateTime) -> i64 {
    i64::try_from(now.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX)
}

#[async_trait]
impl ScoreStore for LocalStore {
    async fn save(&self, score: &NewScore) -> Result<ScoreRecord, StoreError> {
        let now = OffsetDateTime::now_utc();
        let mut records = self.records.lock().await;

        // Ids are wall-clock millis; keep them unique when saves land in the same millisecond.
        let mut id = next_id(now);
        if let Some(max) = records.iter().filter_map(|r| r.id).max() {
            id = id.max(max + 1);
        }
        let record = ScoreRecord::stamp(score, Some(id), now);

        let mut next = records.clone();
        next.push(record.clone());
        rank_records(&mut next, LEADERBOARD_LIMIT);
        self.persist(&next).await?;
        *records = next;

        debug!(player = %record.player_name, score = record.score, "score saved locally");
        Ok(record)
    }

    async fn list_top(&self, limit: usize) -> Result<Vec<ScoreRecord>, StoreError> {
        let records = self.records.lock().await;
        Ok(records.iter().take(limit).cloned().collect())
    }

    fn backend(&self) -> Backend {
        Backend::Local
    }
}

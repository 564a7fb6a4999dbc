//! Backend selection and the local fallback rule.

use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::local::LocalStore;
use crate::record::{rank_records, NewScore, ScoreRecord};
use crate::remote::RemoteStore;
use crate::store::{Backend, ScoreStore};

const UPDATE_CHANNEL_CAPACITY: usize = 16;

/// Where a save ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub record: ScoreRecord,
    pub backend: Backend,
    /// The remote store failed and this save went to the local store instead.
    pub fell_back: bool,
}

/// The active score store for one run of the game.
///
/// Holds an optional primary (normally [`RemoteStore`]) and the local store.
/// Once the primary is found unreachable it is dropped for the rest of the
/// session and every request goes to the local store.
pub struct Leaderboard {
    primary: Option<Box<dyn ScoreStore>>,
    local: LocalStore,
    updates: broadcast::Sender<ScoreRecord>,
    warnings: Vec<String>,
}

impl Leaderboard {
    pub fn new(primary: Option<Box<dyn ScoreStore>>, local: LocalStore) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            primary,
            local,
            updates,
            warnings: Vec::new(),
        }
    }

    /// Select the backend once at startup.
    ///
    /// No remote config, a client that cannot be built, or a failed probe all
    /// select the local store; each case records a warning.
    pub async fn connect(config: &StoreConfig) -> Self {
        let mut warnings = config.warnings().to_vec();

        let local = match &config.scores_path {
            Some(path) => match LocalStore::open(path).await {
                Ok(store) => store,
                Err(e) => {
                    warn!(error = %e, "local score file unusable; keeping scores in memory");
                    warnings.push(format!("local scores unavailable ({e}); keeping them in memory"));
                    LocalStore::in_memory()
                }
            },
            None => LocalStore::in_memory(),
        };

        let primary: Option<Box<dyn ScoreStore>> = match &config.remote {
            Some(remote) => match RemoteStore::new(remote) {
                Ok(store) => match store.probe().await {
                    Ok(()) => {
                        info!(endpoint = store.endpoint(), "remote score store connected");
                        Some(Box::new(store))
                    }
                    Err(e) => {
                        warn!(error = %e, "remote score store probe failed; using local scores");
                        warnings.push(format!("score store unavailable ({e}); using local scores"));
                        None
                    }
                },
                Err(e) => {
                    warnings.push(format!("score store client failed ({e}); using local scores"));
                    None
                }
            },
            None => None,
        };

        if primary.is_none() {
            info!("using local score store");
        }

        let mut leaderboard = Self::new(primary, local);
        leaderboard.warnings = warnings;
        leaderboard
    }

    pub fn backend(&self) -> Backend {
        self.primary
            .as_ref()
            .map(|p| p.backend())
            .unwrap_or(Backend::Local)
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Live feed of every successfully saved record.
    pub fn subscribe(&self) -> broadcast::Receiver<ScoreRecord> {
        self.updates.subscribe()
    }

    fn downgrade(&mut self, err: &StoreError) {
        if self.primary.take().is_some() {
            warn!(error = %err, "score store unreachable; switching to local scores");
            self.warnings
                .push(format!("score store unreachable ({err}); switched to local scores"));
        }
    }

    fn publish(&self, record: &ScoreRecord) {
        // No receivers is fine.
        let _ = self.updates.send(record.clone());
    }

    pub async fn save(&mut self, score: &NewScore) -> Result<SaveOutcome, StoreError> {
        let mut fell_back = false;

        if let Some(primary) = &self.primary {
            match primary.save(score).await {
                Ok(record) => {
                    let backend = primary.backend();
                    self.publish(&record);
                    return Ok(SaveOutcome {
                        record,
                        backend,
                        fell_back,
                    });
                }
                Err(e) if e.is_connectivity() => {
                    self.downgrade(&e);
                    fell_back = true;
                }
                Err(e) => return Err(e),
            }
        }

        let record = self.local.save(score).await?;
        self.publish(&record);
        Ok(SaveOutcome {
            record,
            backend: Backend::Local,
            fell_back,
        })
    }

    /// Up to `limit` records, best first.
    pub async fn list_top(&mut self, limit: usize) -> Result<Vec<ScoreRecord>, StoreError> {
        if let Some(primary) = &self.primary {
            match primary.list_top(limit).await {
                Ok(mut rows) => {
                    rank_records(&mut rows, limit);
                    return Ok(rows);
                }
                Err(e) if e.is_connectivity() => self.downgrade(&e),
                Err(e) => return Err(e),
            }
        }

        let mut rows = self.local.list_top(limit).await?;
        rank_records(&mut rows, limit);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameResult;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Primary that always fails with the given error kind.
    struct FailingStore {
        unreachable: bool,
        calls: Arc<AtomicUsize>,
    }

    impl FailingStore {
        fn error(&self) -> StoreError {
            if self.unreachable {
                StoreError::Unreachable("connection refused".into())
            } else {
                StoreError::Rejected {
                    status: 400,
                    message: "bad row".into(),
                }
            }
        }
    }

    #[async_trait]
    impl ScoreStore for FailingStore {
        async fn save(&self, _score: &NewScore) -> Result<ScoreRecord, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(self.error())
        }

        async fn list_top(&self, _limit: usize) -> Result<Vec<ScoreRecord>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(self.error())
        }

        fn backend(&self) -> Backend {
            Backend::Remote
        }
    }

    fn score(name: &str, points: u32) -> NewScore {
        NewScore::from_result(
            name,
            &GameResult {
                score: points,
                duration_seconds: 30,
                attempts: 9,
                matched_pairs: 8,
                total_pairs: 8,
            },
        )
        .unwrap()
    }

    fn with_primary(unreachable: bool) -> (Leaderboard, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let primary = FailingStore {
            unreachable,
            calls: Arc::clone(&calls),
        };
        (
            Leaderboard::new(Some(Box::new(primary)), LocalStore::in_memory()),
            calls,
        )
    }

    #[tokio::test]
    async fn test_unreachable_primary_falls_back_for_the_session() {
        let (mut lb, calls) = with_primary(true);
        assert_eq!(lb.backend(), Backend::Remote);

        let outcome = lb.save(&score("a", 700)).await.unwrap();
        assert!(outcome.fell_back);
        assert_eq!(outcome.backend, Backend::Local);
        assert_eq!(lb.backend(), Backend::Local);
        assert_eq!(lb.warnings().len(), 1);

        lb.save(&score("b", 900)).await.unwrap();
        let top = lb.list_top(10).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(top.len(), 2);
        assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[tokio::test]
    async fn test_rejected_save_is_surfaced_without_downgrade() {
        let (mut lb, _) = with_primary(false);
        let err = lb.save(&score("a", 700)).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected { status: 400, .. }));
        assert_eq!(lb.backend(), Backend::Remote);
    }

    #[tokio::test]
    async fn test_unreachable_list_downgrades_and_reads_local() {
        let (mut lb, _) = with_primary(true);
        let top = lb.list_top(10).await.unwrap();
        assert!(top.is_empty());
        assert_eq!(lb.backend(), Backend::Local);
    }

    #[tokio::test]
    async fn test_subscribers_see_saved_records() {
        let mut lb = Leaderboard::new(None, LocalStore::in_memory());
        let mut rx = lb.subscribe();
        lb.save(&score("live", 1234)).await.unwrap();

        let record = rx.recv().await.unwrap();
        assert_eq!(record.player_name, "live");
    }

    #[tokio::test]
    async fn test_connect_without_remote_uses_local_and_keeps_warnings() {
        let config = StoreConfig::from_lookup(|_| None).with_scores_path(None);
        let lb = Leaderboard::connect(&config).await;
        assert_eq!(lb.backend(), Backend::Local);
        assert_eq!(lb.warnings(), config.warnings());
    }
}

//! Store runtime integration.
//!
//! Bridges the sync game loop with the async score store. Requests are served
//! one at a time on a background task, so saves never overlap and the game loop
//! only ever polls.

use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::leaderboard::{Leaderboard, SaveOutcome};
use crate::record::{NewScore, ScoreRecord};
use crate::store::Backend;

/// Request from the game loop.
#[derive(Debug, Clone)]
pub enum StoreRequest {
    Save { ticket: u64, score: NewScore },
    ListTop { limit: usize },
}

/// Reply delivered back to the game loop.
#[derive(Debug)]
pub enum StoreReply {
    /// Backend selection finished.
    Ready {
        backend: Backend,
        warnings: Vec<String>,
    },
    Saved {
        ticket: u64,
        result: Result<SaveOutcome, StoreError>,
    },
    Top {
        backend: Backend,
        result: Result<Vec<ScoreRecord>, StoreError>,
    },
}

/// Running store instance.
pub struct StoreRuntime {
    _rt: Runtime,
    req_tx: mpsc::UnboundedSender<StoreRequest>,
    reply_rx: mpsc::UnboundedReceiver<StoreReply>,
}

impl StoreRuntime {
    /// Start the runtime and select a backend from `config` in the background.
    pub fn start(config: StoreConfig) -> Result<Self, StoreError> {
        Self::spawn(async move { Leaderboard::connect(&config).await })
    }

    /// Start the runtime around an already-built leaderboard.
    pub fn with_leaderboard(leaderboard: Leaderboard) -> Result<Self, StoreError> {
        Self::spawn(async move { leaderboard })
    }

    fn spawn<F>(make: F) -> Result<Self, StoreError>
    where
        F: std::future::Future<Output = Leaderboard> + Send + 'static,
    {
        let (req_tx, req_rx) = mpsc::unbounded_channel::<StoreRequest>();
        let (reply_tx, reply_rx) = mpsc::unbounded_channel::<StoreReply>();

        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("score-store")
            .enable_all()
            .build()?;

        rt.spawn(async move {
            let leaderboard = make.await;
            serve(leaderboard, req_rx, reply_tx).await;
        });

        Ok(Self {
            _rt: rt,
            req_tx,
            reply_rx,
        })
    }

    pub fn submit(&self, request: StoreRequest) -> Result<(), StoreError> {
        self.req_tx
            .send(request)
            .map_err(|_| StoreError::RuntimeClosed)
    }

    pub fn try_recv(&mut self) -> Option<StoreReply> {
        self.reply_rx.try_recv().ok()
    }
}

async fn serve(
    mut leaderboard: Leaderboard,
    mut req_rx: mpsc::UnboundedReceiver<StoreRequest>,
    reply_tx: mpsc::UnboundedSender<StoreReply>,
) {
    let ready = StoreReply::Ready {
        backend: leaderboard.backend(),
        warnings: leaderboard.warnings().to_vec(),
    };
    if reply_tx.send(ready).is_err() {
        return;
    }

    while let Some(request) = req_rx.recv().await {
        let reply = match request {
            StoreRequest::Save { ticket, score } => {
                debug!(ticket, player = %score.player_name, "save requested");
                let result = leaderboard.save(&score).await;
                StoreReply::Saved { ticket, result }
            }
            StoreRequest::ListTop { limit } => {
                let result = leaderboard.list_top(limit).await;
                StoreReply::Top {
                    backend: leaderboard.backend(),
                    result,
                }
            }
        };
        if reply_tx.send(reply).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameResult;
    use crate::local::LocalStore;
    use std::time::{Duration, Instant};

    fn wait_reply(rt: &mut StoreRuntime) -> StoreReply {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(reply) = rt.try_recv() {
                return reply;
            }
            assert!(Instant::now() < deadline, "no reply from store runtime");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_ready_then_save_then_list() {
        let lb = Leaderboard::new(None, LocalStore::in_memory());
        let mut rt = StoreRuntime::with_leaderboard(lb).unwrap();

        match wait_reply(&mut rt) {
            StoreReply::Ready { backend, warnings } => {
                assert_eq!(backend, Backend::Local);
                assert!(warnings.is_empty());
            }
            other => panic!("expected Ready, got {other:?}"),
        }

        let score = NewScore::from_result(
            "runner",
            &GameResult {
                score: 1800,
                duration_seconds: 40,
                attempts: 10,
                matched_pairs: 8,
                total_pairs: 8,
            },
        )
        .unwrap();
        rt.submit(StoreRequest::Save { ticket: 7, score }).unwrap();
        rt.submit(StoreRequest::ListTop { limit: 10 }).unwrap();

        match wait_reply(&mut rt) {
            StoreReply::Saved { ticket, result } => {
                assert_eq!(ticket, 7);
                assert_eq!(result.unwrap().record.score, 1800);
            }
            other => panic!("expected Saved, got {other:?}"),
        }
        match wait_reply(&mut rt) {
            StoreReply::Top { result, .. } => {
                let top = result.unwrap();
                assert_eq!(top.len(), 1);
                assert_eq!(top[0].player_name, "runner");
            }
            other => panic!("expected Top, got {other:?}"),
        }
    }
}

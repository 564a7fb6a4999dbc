//! Local persistence and the remote-to-local fallback rule.

use std::net::TcpListener;
use std::time::{Duration, Instant};

use memory_match::core::GameResult;
use memory_match::store::{
    Backend, Leaderboard, LocalStore, NewScore, ScoreStore, StoreConfig, StoreError, StoreReply,
    StoreRequest, StoreRuntime,
};

fn score(name: &str, points: u32) -> NewScore {
    NewScore::from_result(
        name,
        &GameResult {
            score: points,
            duration_seconds: 95,
            attempts: 14,
            matched_pairs: 8,
            total_pairs: 8,
        },
    )
    .unwrap()
}

/// A loopback port nothing listens on.
fn dead_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

fn remote_lookup(url: String, scores_path: String) -> impl Fn(&str) -> Option<String> {
    move |name| match name {
        "MEMORY_MATCH_STORE_URL" => Some(url.clone()),
        "MEMORY_MATCH_STORE_KEY" => Some("test-key".to_string()),
        "MEMORY_MATCH_STORE_TIMEOUT_MS" => Some("2000".to_string()),
        "MEMORY_MATCH_SCORES_PATH" => Some(scores_path.clone()),
        _ => None,
    }
}

#[tokio::test]
async fn local_scores_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("scores.json");

    let store = LocalStore::open(&path).await.unwrap();
    store.save(&score("ana", 2100)).await.unwrap();
    store.save(&score("bo", 2300)).await.unwrap();
    drop(store);

    let reopened = LocalStore::open(&path).await.unwrap();
    let top = reopened.list_top(10).await.unwrap();
    let names: Vec<&str> = top.iter().map(|r| r.player_name.as_str()).collect();
    assert_eq!(names, ["bo", "ana"]);
    assert!(top.iter().all(|r| r.id.is_some()));
}

#[tokio::test]
async fn local_file_is_plain_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");
    let store = LocalStore::open(&path).await.unwrap();
    store.save(&score("cy", 1800)).await.unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["player_name"], "cy");
    assert_eq!(rows[0]["score"], 1800);
    assert_eq!(rows[0]["game_duration_seconds"], 95);
    assert!(rows[0]["created_at"].is_string());
}

#[tokio::test]
async fn corrupt_local_file_is_reported() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), b"{ not json").unwrap();

    let err = LocalStore::open(file.path()).await.unwrap_err();
    assert!(matches!(err, StoreError::Corrupt(_)));

    // The leaderboard keeps going in memory instead.
    let config = StoreConfig::local(Some(file.path().to_path_buf()));
    let mut board = Leaderboard::connect(&config).await;
    assert_eq!(board.backend(), Backend::Local);
    assert!(!board.warnings().is_empty());
    board.save(&score("dee", 900)).await.unwrap();
    assert_eq!(board.list_top(10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn missing_credential_selects_local_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json").display().to_string();
    let config = StoreConfig::from_lookup(|name| match name {
        "MEMORY_MATCH_STORE_URL" => Some("https://example.invalid".to_string()),
        "MEMORY_MATCH_STORE_KEY" => Some("YOUR_ANON_KEY_HERE".to_string()),
        "MEMORY_MATCH_SCORES_PATH" => Some(path.clone()),
        _ => None,
    });
    assert!(config.remote.is_none());

    let board = Leaderboard::connect(&config).await;
    assert_eq!(board.backend(), Backend::Local);
    assert!(board.warnings().iter().any(|w| w.contains("credential")));
}

#[tokio::test]
async fn unreachable_remote_falls_back_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json").display().to_string();
    let url = format!("http://127.0.0.1:{}", dead_port());
    let config = StoreConfig::from_lookup(remote_lookup(url, path));
    assert!(config.remote.is_some());

    let mut board = Leaderboard::connect(&config).await;
    assert_eq!(board.backend(), Backend::Local);
    assert!(board.warnings().iter().any(|w| w.contains("using local scores")));

    let outcome = board.save(&score("eve", 1500)).await.unwrap();
    assert_eq!(outcome.backend, Backend::Local);
    assert!(!outcome.fell_back);
}

#[tokio::test]
async fn leaderboard_stays_ranked_and_capped() {
    let mut board = Leaderboard::new(None, LocalStore::in_memory());
    for (i, points) in [500, 2200, 1300, 2200, 100, 1900, 800, 1700, 2000, 600, 1200, 50]
        .into_iter()
        .enumerate()
    {
        board.save(&score(&format!("p{i}"), points)).await.unwrap();
    }

    let top = board.list_top(10).await.unwrap();
    assert_eq!(top.len(), 10);
    assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
    // Ties keep insertion order.
    assert_eq!(top[0].player_name, "p1");
    assert_eq!(top[1].player_name, "p3");
    assert_eq!(top[9].score, 500);
}

#[tokio::test]
async fn saved_records_are_broadcast() {
    let mut board = Leaderboard::new(None, LocalStore::in_memory());
    let mut updates = board.subscribe();
    board.save(&score("fay", 1234)).await.unwrap();
    let record = updates.recv().await.unwrap();
    assert_eq!(record.player_name, "fay");
    assert_eq!(record.score, 1234);
}

fn wait_reply(rt: &mut StoreRuntime) -> StoreReply {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if let Some(reply) = rt.try_recv() {
            return reply;
        }
        assert!(Instant::now() < deadline, "store runtime did not reply");
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn runtime_serves_requests_from_sync_code() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::local(Some(dir.path().join("scores.json")));
    let mut rt = StoreRuntime::start(config).unwrap();

    match wait_reply(&mut rt) {
        StoreReply::Ready { backend, .. } => assert_eq!(backend, Backend::Local),
        other => panic!("expected Ready, got {other:?}"),
    }

    rt.submit(StoreRequest::Save {
        ticket: 42,
        score: score("gus", 1999),
    })
    .unwrap();
    match wait_reply(&mut rt) {
        StoreReply::Saved { ticket, result } => {
            assert_eq!(ticket, 42);
            let outcome = result.unwrap();
            assert_eq!(outcome.record.player_name, "gus");
        }
        other => panic!("expected Saved, got {other:?}"),
    }

    rt.submit(StoreRequest::ListTop { limit: 10 }).unwrap();
    match wait_reply(&mut rt) {
        StoreReply::Top { result, .. } => assert_eq!(result.unwrap().len(), 1),
        other => panic!("expected Top, got {other:?}"),
    }
}

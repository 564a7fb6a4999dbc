//! Hosted score table reached over its PostgREST interface.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::RemoteConfig;
use crate::error::StoreError;
use crate::record::{rank_records, NewScore, ScoreRecord};
use crate::store::{Backend, ScoreStore};

#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: Client,
    endpoint: String,
    api_key: String,
}

/// Error body returned by PostgREST.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    details: Option<String>,
}

impl RemoteStore {
    pub fn new(config: &RemoteConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: config.endpoint(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, &self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Cheap read used at startup to decide whether the table is usable.
    pub async fn probe(&self) -> Result<(), StoreError> {
        let response = self
            .request(Method::GET)
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

async fn check(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody {
            message: Some(message),
            details,
        }) => match details {
            Some(details) if !details.is_empty() => format!("{message} ({details})"),
            _ => message,
        },
        _ if body.is_empty() => status.canonical_reason().unwrap_or("error").to_string(),
        _ => body,
    };
    warn!(status = status.as_u16(), %message, "score store request failed");
    Err(StoreError::from_status(status.as_u16(), message))
}

#[async_trait]
impl ScoreStore for RemoteStore {
    async fn save(&self, score: &NewScore) -> Result<ScoreRecord, StoreError> {
        let response = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(&[score])
            .send()
            .await?;
        let rows: Vec<ScoreRecord> = check(response).await?.json().await?;
        let record = rows
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no rows".to_string()))?;
        debug!(player = %record.player_name, score = record.score, "score saved remotely");
        Ok(record)
    }

    async fn list_top(&self, limit: usize) -> Result<Vec<ScoreRecord>, StoreError> {
        let limit = limit.to_string();
        let response = self
            .request(Method::GET)
            .query(&[("select", "*"), ("order", "score.desc"), ("limit", limit.as_str())])
            .send()
            .await?;
        let mut rows: Vec<ScoreRecord> = check(response).await?.json().await?;
        let n = rows.len();
        rank_records(&mut rows, n);
        Ok(rows)
    }

    fn backend(&self) -> Backend {
        Backend::Remote
    }
}

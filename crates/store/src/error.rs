use thiserror::Error;

/// Errors surfaced by score stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network-level failure; triggers the local fallback.
    #[error("score store unreachable: {0}")]
    Unreachable(String),
    #[error("score store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected response from score store: {0}")]
    Decode(String),
    #[error("score file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("score file is corrupt: {0}")]
    Corrupt(String),
    #[error("player name must not be empty")]
    EmptyName,
    #[error("score store runtime has stopped")]
    RuntimeClosed,
}

impl StoreError {
    /// Whether this failure means the backend cannot be reached at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, StoreError::Unreachable(_))
    }

    /// Classify a non-success HTTP status.
    ///
    /// Server errors, request timeouts and rate limiting mean the hosted
    /// service is down or overloaded, so they count as unreachable. Any other
    /// status is the server refusing this particular request.
    pub fn from_status(status: u16, message: String) -> Self {
        if status >= 500 || status == 408 || status == 429 {
            StoreError::Unreachable(format!("HTTP {status}: {message}"))
        } else {
            StoreError::Rejected { status, message }
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            StoreError::from_status(status.as_u16(), err.to_string())
        } else {
            StoreError::Unreachable(err.to_string())
        }
    }
}

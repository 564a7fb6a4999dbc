//! Store configuration from the environment.
//!
//! A missing or placeholder credential never fails startup; it only disables
//! the remote store and records a warning for the frontend to show.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TABLE: &str = "game_scores";
pub const DEFAULT_SCORES_PATH: &str = ".memory-match/high_scores.json";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Value shipped in unconfigured builds; treated the same as no key.
pub const PLACEHOLDER_KEY: &str = "YOUR_ANON_KEY_HERE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub url: String,
    pub api_key: String,
    pub table: String,
    pub timeout: Duration,
}

impl RemoteConfig {
    /// REST endpoint of the score table.
    pub fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), self.table)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub remote: Option<RemoteConfig>,
    /// `None` keeps the local fallback in memory only.
    pub scores_path: Option<PathBuf>,
    warnings: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            remote: None,
            scores_path: Some(PathBuf::from(DEFAULT_SCORES_PATH)),
            warnings: Vec::new(),
        }
    }
}

impl StoreConfig {
    /// Local-only config, used by tests and `MEMORY_MATCH_OFFLINE`.
    pub fn local(scores_path: Option<PathBuf>) -> Self {
        Self {
            remote: None,
            scores_path,
            warnings: Vec::new(),
        }
    }

    pub fn with_scores_path(mut self, scores_path: Option<PathBuf>) -> Self {
        self.scores_path = scores_path;
        self
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |primary: &str, fallback: Option<&str>| {
            lookup(primary)
                .or_else(|| fallback.and_then(|name| lookup(name)))
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut warnings = Vec::new();

        let offline = get("MEMORY_MATCH_OFFLINE", None)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let scores_path = get("MEMORY_MATCH_SCORES_PATH", None)
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from(DEFAULT_SCORES_PATH)));

        let table = get("MEMORY_MATCH_STORE_TABLE", None).unwrap_or_else(|| DEFAULT_TABLE.to_string());

        let timeout_ms = match get("MEMORY_MATCH_STORE_TIMEOUT_MS", None) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warnings.push(format!(
                    "ignoring invalid MEMORY_MATCH_STORE_TIMEOUT_MS={raw:?}"
                ));
                DEFAULT_TIMEOUT_MS
            }),
            None => DEFAULT_TIMEOUT_MS,
        };

        let url = get("MEMORY_MATCH_STORE_URL", Some("SUPABASE_URL"));
        let api_key = get("MEMORY_MATCH_STORE_KEY", Some("SUPABASE_ANON_KEY"))
            .filter(|key| key != PLACEHOLDER_KEY);

        let remote = if offline {
            None
        } else {
            match (url, api_key) {
                (Some(url), Some(api_key)) => Some(RemoteConfig {
                    url,
                    api_key,
                    table,
                    timeout: Duration::from_millis(timeout_ms),
                }),
                (None, Some(_)) => {
                    warnings.push(
                        "store URL is not set (MEMORY_MATCH_STORE_URL); scores are kept locally"
                            .to_string(),
                    );
                    None
                }
                (_, None) => {
                    warnings.push(
                        "store credential is not set (MEMORY_MATCH_STORE_KEY); scores are kept locally"
                            .to_string(),
                    );
                    None
                }
            }
        };

        Self {
            remote,
            scores_path,
            warnings,
        }
    }

    /// Human-readable startup warnings.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_credential_disables_remote_with_warning() {
        let cfg = StoreConfig::from_lookup(lookup(&[("SUPABASE_URL", "https://x.example")]));
        assert!(cfg.remote.is_none());
        assert_eq!(cfg.warnings().len(), 1);
        assert!(cfg.warnings()[0].contains("credential"));
    }

    #[test]
    fn test_placeholder_key_counts_as_missing() {
        let cfg = StoreConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://x.example"),
            ("SUPABASE_ANON_KEY", PLACEHOLDER_KEY),
        ]));
        assert!(cfg.remote.is_none());
        assert!(!cfg.warnings().is_empty());
    }

    #[test]
    fn test_primary_names_win_over_supabase_names() {
        let cfg = StoreConfig::from_lookup(lookup(&[
            ("MEMORY_MATCH_STORE_URL", "https://primary.example/"),
            ("SUPABASE_URL", "https://legacy.example"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("MEMORY_MATCH_STORE_TIMEOUT_MS", "250"),
        ]));
        let remote = cfg.remote.as_ref().expect("remote configured");
        assert_eq!(remote.url, "https://primary.example/");
        assert_eq!(remote.api_key, "anon");
        assert_eq!(remote.timeout, Duration::from_millis(250));
        assert_eq!(remote.endpoint(), "https://primary.example/rest/v1/game_scores");
        assert!(cfg.warnings().is_empty());
    }

    #[test]
    fn test_offline_skips_remote_silently() {
        let cfg = StoreConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://x.example"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("MEMORY_MATCH_OFFLINE", "true"),
            ("MEMORY_MATCH_SCORES_PATH", "/tmp/scores.json"),
        ]));
        assert!(cfg.remote.is_none());
        assert!(cfg.warnings().is_empty());
        assert_eq!(cfg.scores_path, Some(PathBuf::from("/tmp/scores.json")));
    }

    #[test]
    fn test_bad_timeout_falls_back_to_default() {
        let cfg = StoreConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://x.example"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("MEMORY_MATCH_STORE_TIMEOUT_MS", "soon"),
        ]));
        assert_eq!(
            cfg.remote.as_ref().unwrap().timeout,
            Duration::from_millis(DEFAULT_TIMEOUT_MS)
        );
        assert_eq!(cfg.warnings().len(), 1);
    }
}

//! Response cache configuration from TOML (`[cache]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where collaborator responses are cached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Memory,
    Redis,
    None,
}

/// `[cache]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCacheConfig {
    pub backend: CacheBackend,
    /// Connection URL, required when `backend = "redis"`.
    pub redis_url: Option<String>,
    /// TTL for events, pull requests and Jira responses.
    pub default_ttl_seconds: u64,
    /// TTL for repository lists and commits.
    pub commits_ttl_seconds: u64,
}

impl Default for FileCacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            redis_url: None,
            default_ttl_seconds: 300,
            commits_ttl_seconds: 600,
        }
    }
}

impl FileCacheConfig {
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_seconds)
    }

    pub fn commits_ttl(&self) -> Duration {
        Duration::from_secs(self.commits_ttl_seconds)
    }
}

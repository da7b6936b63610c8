//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types by
//! the composition root.

mod cache;
mod chat;
mod identity;
mod logging;
mod providers;

pub use cache::{CacheBackend, FileCacheConfig};
pub use chat::{FileAggregationConfig, FileChatConfig};
pub use identity::{FileIdentityConfig, FileIdentityEntry};
pub use logging::FileLoggingConfig;
pub use providers::{FileGitHubConfig, FileJiraConfig, FileOpenAiConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("{field} cannot be 0")]
    InvalidTimeout { field: &'static str },

    #[error("openai.model cannot be empty")]
    EmptyModelName,

    #[error("cache.redis_url is required when cache.backend = \"redis\"")]
    MissingRedisUrl,

    #[error("identity.default_user cannot be empty")]
    EmptyDefaultUser,

    #[error("identity.users contains '{0}' more than once")]
    DuplicateIdentity(String),

    #[error("{field} must be an http(s) URL, got '{value}'")]
    InvalidUrl { field: &'static str, value: String },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat turn settings
    pub chat: FileChatConfig,
    /// Member activity aggregation settings
    pub aggregation: FileAggregationConfig,
    /// OpenAI chat completions
    pub openai: FileOpenAiConfig,
    /// GitHub REST API
    pub github: FileGitHubConfig,
    /// Jira REST API
    pub jira: FileJiraConfig,
    /// Response cache
    pub cache: FileCacheConfig,
    /// Name to account directory
    pub identity: FileIdentityConfig,
    /// Transcript and log files
    pub logging: FileLoggingConfig,
}

fn check_url(field: &'static str, value: &str) -> Result<(), ConfigValidationError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        })
    }
}

impl FileConfig {
    /// Validate the configuration, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let timeouts = [
            ("chat.turn_timeout_seconds", self.chat.turn_timeout_seconds),
            ("openai.timeout_seconds", self.openai.timeout_seconds),
            ("github.timeout_seconds", self.github.timeout_seconds),
            ("jira.timeout_seconds", self.jira.timeout_seconds),
            ("cache.default_ttl_seconds", self.cache.default_ttl_seconds),
            ("cache.commits_ttl_seconds", self.cache.commits_ttl_seconds),
        ];
        if let Some((field, _)) = timeouts.into_iter().find(|(_, secs)| *secs == 0) {
            return Err(ConfigValidationError::InvalidTimeout { field });
        }

        if self.openai.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        check_url("openai.base_url", &self.openai.base_url)?;
        check_url("github.api_url", &self.github.api_url)?;
        if self.jira.is_configured() {
            check_url("jira.base_url", &self.jira.base_url)?;
        }

        if self.cache.backend == CacheBackend::Redis
            && self
                .cache
                .redis_url
                .as_deref()
                .is_none_or(|url| url.trim().is_empty())
        {
            return Err(ConfigValidationError::MissingRedisUrl);
        }

        if self.identity.default_user.trim().is_empty() {
            return Err(ConfigValidationError::EmptyDefaultUser);
        }
        if let Some(name) = self.identity.duplicate_name() {
            return Err(ConfigValidationError::DuplicateIdentity(name.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monitor_application::AggregationMode;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[chat]
fallback_message = "Please retry."
turn_timeout_seconds = 30

[aggregation]
mode = "sequential"

[openai]
model = "gpt-4o"

[jira]
base_url = "https://acme.atlassian.net"
max_results = 25

[cache]
backend = "redis"
redis_url = "redis://127.0.0.1:6379/0"

[identity]
default_user = "alice"

[[identity.users]]
name = "alice"
jira_account_id = "alice.jira"
github_handle = "alice-gh"

[logging]
conversation_log = "/tmp/team-monitor/conversation.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.chat.fallback_message, "Please retry.");
        assert_eq!(config.chat.turn_timeout_seconds, 30);
        assert_eq!(config.aggregation.mode, AggregationMode::Sequential);
        assert_eq!(config.openai.model, "gpt-4o");
        assert_eq!(config.jira.max_results, 25);
        assert_eq!(config.cache.backend, CacheBackend::Redis);
        assert_eq!(config.identity.users.len(), 1);
        assert_eq!(config.identity.users[0].github_handle, "alice-gh");
        assert!(config.logging.conversation_log.is_some());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[openai]
max_tokens = 512
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.openai.max_tokens, 512);
        // Defaults should apply
        assert_eq!(config.openai.model, "gpt-4o-mini");
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.aggregation.mode, AggregationMode::Concurrent);
        assert_eq!(config.identity.default_user, "shubham");
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = FileConfig::default();
        config.chat.turn_timeout_seconds = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout {
                field: "chat.turn_timeout_seconds"
            })
        );
    }

    #[test]
    fn test_validate_redis_without_url() {
        let mut config = FileConfig::default();
        config.cache.backend = CacheBackend::Redis;
        assert_eq!(config.validate(), Err(ConfigValidationError::MissingRedisUrl));
    }

    #[test]
    fn test_validate_empty_model() {
        let mut config = FileConfig::default();
        config.openai.model = " ".to_string();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));
    }

    #[test]
    fn test_validate_bad_jira_url() {
        let mut config = FileConfig::default();
        config.jira.base_url = "acme.atlassian.net".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "jira.base_url must be an http(s) URL, got 'acme.atlassian.net'"
        );
    }
}

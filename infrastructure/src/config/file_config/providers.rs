//! Collaborator configuration from TOML (`[openai]`, `[github]`, `[jira]`)

use serde::{Deserialize, Serialize};

/// Read a credential from its direct value, falling back to the named
/// environment variable. Blank values count as unset.
fn resolve_secret(direct: Option<&str>, env_name: &str) -> Option<String> {
    direct
        .map(str::to_string)
        .or_else(|| std::env::var(env_name).ok())
        .filter(|value| !value.trim().is_empty())
}

/// OpenAI API provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL for the chat completions API.
    pub base_url: String,
    /// Model used for every request.
    pub model: String,
    /// Max tokens per response.
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 1024,
            timeout_seconds: 60,
        }
    }
}

impl FileOpenAiConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_secret(self.api_key.as_deref(), &self.api_key_env)
    }
}

/// GitHub REST API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGitHubConfig {
    pub api_url: String,
    /// Environment variable name for the token (default: "GITHUB_TOKEN").
    pub token_env: String,
    pub token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for FileGitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            token_env: "GITHUB_TOKEN".to_string(),
            token: None,
            timeout_seconds: 30,
        }
    }
}

impl FileGitHubConfig {
    pub fn resolve_token(&self) -> Option<String> {
        resolve_secret(self.token.as_deref(), &self.token_env)
    }
}

/// Jira Cloud REST API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileJiraConfig {
    /// Site URL, e.g. `https://example.atlassian.net`.
    pub base_url: String,
    /// Environment variable holding the Basic auth credential (default: "JIRA_TOKEN").
    pub token_env: String,
    pub token: Option<String>,
    /// `maxResults` for JQL searches.
    pub max_results: u32,
    /// Number of changelog entries returned by `get_issue_updates`.
    pub updates_limit: usize,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for FileJiraConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token_env: "JIRA_TOKEN".to_string(),
            token: None,
            max_results: 10,
            updates_limit: 10,
            timeout_seconds: 30,
        }
    }
}

impl FileJiraConfig {
    pub fn resolve_token(&self) -> Option<String> {
        resolve_secret(self.token.as_deref(), &self.token_env)
    }

    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty()
    }
}

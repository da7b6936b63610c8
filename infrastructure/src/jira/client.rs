//! Jira Cloud REST client implementing [`IssueTrackerPort`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use monitor_application::{CachePort, IssueTrackerPort};
use monitor_domain::{Collaborator, CollaboratorError, Issue, IssueQuery, IssueStatus, IssueUpdate};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::jql::build_jql;
use super::wire::{
    ChangelogResponse, SearchResponse, StatusResponse, map_changelog, map_issues, map_status,
};
use crate::cache::{get_json, set_json};
use crate::http::{build_client, send_json};

const TRACKER: Collaborator = Collaborator::IssueTracker;

/// Connection settings for [`JiraClient`].
#[derive(Debug, Clone)]
pub struct JiraConfig {
    pub base_url: String,
    /// Base64 `email:api_token`, sent as `Authorization: Basic ..`.
    token: Option<Secret<String>>,
    pub max_results: u32,
    pub timeout: Duration,
    pub cache_ttl: Duration,
}

impl JiraConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            max_results: 10,
            timeout: Duration::from_secs(30),
            cache_ttl: Duration::from_secs(300),
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.map(Secret::new);
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}

pub struct JiraClient {
    config: JiraConfig,
    http: reqwest::Client,
    cache: Arc<dyn CachePort>,
}

/// Issue keys look like `ENG-123`.
fn check_issue_key(key: &str) -> Result<&str, CollaboratorError> {
    let key = key.trim();
    let valid = key
        .split_once('-')
        .is_some_and(|(project, number)| {
            !project.is_empty()
                && project.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                && !number.is_empty()
                && number.chars().all(|c| c.is_ascii_digit())
        });
    if valid {
        Ok(key)
    } else {
        Err(CollaboratorError::invalid_input(
            TRACKER,
            format!("'{key}' is not an issue key"),
        ))
    }
}

impl JiraClient {
    pub fn new(config: JiraConfig, cache: Arc<dyn CachePort>) -> Result<Self, CollaboratorError> {
        let http = build_client(TRACKER, config.timeout)?;
        Ok(Self {
            config,
            http,
            cache,
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CollaboratorError> {
        let mut request = self
            .http
            .get(format!("{}{}", self.config.base_url, path))
            .header("Accept", "application/json")
            .query(query);
        if let Some(token) = &self.config.token {
            request = request.header("Authorization", format!("Basic {}", token.expose_secret()));
        }
        debug!(path, "Jira request");
        send_json(TRACKER, request).await
    }
}

#[async_trait]
impl IssueTrackerPort for JiraClient {
    async fn search_issues(&self, query: &IssueQuery) -> Result<Vec<Issue>, CollaboratorError> {
        let jql = build_jql(query);
        let key = format!("jira_issues:{jql}");
        if let Some(hit) = get_json(self.cache.as_ref(), &key).await {
            return Ok(hit);
        }

        debug!(jql = %jql, "Searching issues");
        let max_results = self.config.max_results.to_string();
        let response: SearchResponse = self
            .get(
                "/rest/api/3/search/jql",
                &[
                    ("jql", jql.as_str()),
                    ("maxResults", max_results.as_str()),
                    ("fields", "*all"),
                ],
            )
            .await?;
        let issues = map_issues(response);

        set_json(self.cache.as_ref(), &key, &issues, self.config.cache_ttl).await;
        Ok(issues)
    }

    async fn issue_status(&self, key: &str) -> Result<IssueStatus, CollaboratorError> {
        let issue_key = check_issue_key(key)?;
        let cache_key = format!("jira_status:{issue_key}");
        if let Some(hit) = get_json(self.cache.as_ref(), &cache_key).await {
            return Ok(hit);
        }

        let response: StatusResponse = self
            .get(
                &format!("/rest/api/3/issue/{issue_key}"),
                &[("fields", "status")],
            )
            .await?;
        let status = map_status(response);

        set_json(self.cache.as_ref(), &cache_key, &status, self.config.cache_ttl).await;
        Ok(status)
    }

    async fn issue_updates(
        &self,
        key: &str,
        limit: usize,
    ) -> Result<IssueUpdate, CollaboratorError> {
        let issue_key = check_issue_key(key)?;
        let cache_key = format!("jira_updates:{issue_key}");

        // Cached entries hold the full changelog; the limit applies on the way out.
        let update = match get_json::<IssueUpdate>(self.cache.as_ref(), &cache_key).await {
            Some(hit) => hit,
            None => {
                let response: ChangelogResponse = self
                    .get(
                        &format!("/rest/api/3/issue/{issue_key}"),
                        &[("expand", "changelog")],
                    )
                    .await?;
                let update = map_changelog(response);
                set_json(self.cache.as_ref(), &cache_key, &update, self.config.cache_ttl).await;
                update
            }
        };

        Ok(update.truncate_to_recent(limit))
    }
}

//! GitHub REST client implementing [`SourceControlPort`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use monitor_application::{CachePort, SourceControlPort};
use monitor_domain::{
    Collaborator, CollaboratorError, Commit, CommitWindow, PullRequest, PullRequestFilter,
    UserEvent,
};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::wire::{
    self, CommitItem, EventItem, PullItem, RepoItem, SearchIssues, map_commits, map_events,
    map_pull_list, map_search_list, split_repo,
};
use crate::cache::{get_json, set_json};
use crate::http::{build_client, send_json};

const SOURCE: Collaborator = Collaborator::SourceControl;

/// Connection settings for [`GitHubClient`].
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub api_url: String,
    token: Option<Secret<String>>,
    pub timeout: Duration,
    /// TTL for events and pull requests.
    pub default_ttl: Duration,
    /// TTL for repository lists and commits.
    pub commits_ttl: Duration,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            token: None,
            timeout: Duration::from_secs(30),
            default_ttl: Duration::from_secs(300),
            commits_ttl: Duration::from_secs(600),
        }
    }
}

impl GitHubConfig {
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.map(Secret::new);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_ttls(mut self, default_ttl: Duration, commits_ttl: Duration) -> Self {
        self.default_ttl = default_ttl;
        self.commits_ttl = commits_ttl;
        self
    }
}

pub struct GitHubClient {
    config: GitHubConfig,
    http: reqwest::Client,
    cache: Arc<dyn CachePort>,
}

impl GitHubClient {
    pub fn new(config: GitHubConfig, cache: Arc<dyn CachePort>) -> Result<Self, CollaboratorError> {
        if config.token.is_none() {
            warn!("No GitHub token configured, requests are unauthenticated and rate limited");
        }
        let http = build_client(SOURCE, config.timeout)?;
        Ok(Self {
            config,
            http,
            cache,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CollaboratorError> {
        let mut request = self
            .http
            .get(self.url(path))
            .header("Accept", "application/vnd.github+json")
            .query(query);
        if let Some(token) = &self.config.token {
            request = request.header("Authorization", format!("token {}", token.expose_secret()));
        }
        debug!(path, "GitHub request");
        send_json(SOURCE, request).await
    }

    /// Serve `key` from the cache, or fetch and store it.
    async fn cached<T, F>(&self, key: &str, ttl: Duration, fetch: F) -> Result<T, CollaboratorError>
    where
        T: Serialize + DeserializeOwned,
        F: Future<Output = Result<T, CollaboratorError>>,
    {
        if let Some(hit) = get_json(self.cache.as_ref(), key).await {
            return Ok(hit);
        }
        let value = fetch.await?;
        set_json(self.cache.as_ref(), key, &value, ttl).await;
        Ok(value)
    }

    async fn list_user_repos(&self, handle: &str) -> Result<Vec<String>, CollaboratorError> {
        let key = format!("github_repos_{handle}");
        self.cached(&key, self.config.commits_ttl, async {
            let repos: Vec<RepoItem> = self
                .get(&format!("/users/{handle}/repos"), &[("per_page", "100")])
                .await?;
            Ok(repos.into_iter().map(|r| r.name).collect())
        })
        .await
    }

    async fn repo_commits(
        &self,
        handle: &str,
        repo: &str,
        window: &CommitWindow,
    ) -> Result<Vec<Commit>, CollaboratorError> {
        let since = window.since.as_deref().unwrap_or_default();
        let until = window.until.as_deref().unwrap_or_default();
        let key = format!("github_commits_{handle}_{repo}_{since}_{until}");

        self.cached(&key, self.config.commits_ttl, async {
            let path = if repo.contains('/') {
                let (owner, name) = split_repo(repo)?;
                format!("/repos/{owner}/{name}/commits")
            } else {
                format!("/repos/{handle}/{repo}/commits")
            };
            let mut query = vec![("author", handle)];
            if !since.is_empty() {
                query.push(("since", since));
            }
            if !until.is_empty() {
                query.push(("until", until));
            }
            let items: Vec<CommitItem> = self.get(&path, &query).await?;
            Ok(map_commits(items, repo))
        })
        .await
    }
}

#[async_trait]
impl SourceControlPort for GitHubClient {
    async fn user_commits(
        &self,
        handle: &str,
        repo: Option<&str>,
        window: &CommitWindow,
    ) -> Result<Vec<Commit>, CollaboratorError> {
        if let Some(repo) = repo {
            return self.repo_commits(handle, repo, window).await;
        }

        let repos = self.list_user_repos(handle).await?;
        debug!(handle, repos = repos.len(), "Collecting commits across repositories");

        let results = join_all(
            repos
                .iter()
                .map(|repo| self.repo_commits(handle, repo, window)),
        )
        .await;

        // A failed repository is skipped unless every repository failed.
        let mut commits = Vec::new();
        let mut succeeded = 0;
        let mut first_error = None;
        for (repo, result) in repos.iter().zip(results) {
            match result {
                Ok(found) => {
                    succeeded += 1;
                    commits.extend(found);
                }
                Err(e) => {
                    warn!(repo = %repo, error = %e, "Skipping repository");
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }
        match first_error {
            Some(e) if succeeded == 0 => Err(e),
            _ => Ok(commits),
        }
    }

    async fn user_events(&self, handle: &str) -> Result<Vec<UserEvent>, CollaboratorError> {
        let key = format!("github_events_{handle}");
        self.cached(&key, self.config.default_ttl, async {
            let items: Vec<EventItem> = self.get(&format!("/users/{handle}/events"), &[]).await?;
            Ok(map_events(items))
        })
        .await
    }

    async fn repo_pull_requests(
        &self,
        repo: &str,
        filter: PullRequestFilter,
    ) -> Result<Vec<PullRequest>, CollaboratorError> {
        let (owner, name) = split_repo(repo)?;
        let key = format!("github_prs_{owner}_{name}_{filter}");

        self.cached(&key, self.config.default_ttl, async {
            let items: Vec<PullItem> = self
                .get(
                    &format!("/repos/{owner}/{name}/pulls"),
                    &[("state", wire::pulls_state(filter))],
                )
                .await?;
            Ok(map_pull_list(items, repo, filter))
        })
        .await
    }

    async fn user_pull_requests(
        &self,
        handle: &str,
        filter: PullRequestFilter,
    ) -> Result<Vec<PullRequest>, CollaboratorError> {
        if handle.trim().is_empty() {
            return Err(CollaboratorError::invalid_input(
                Collaborator::Identity,
                "github identity not found",
            ));
        }
        let key = format!("github_user_wide_prs_{handle}_{filter}");

        self.cached(&key, self.config.default_ttl, async {
            let q = wire::user_pr_search_query(handle, filter);
            let search: SearchIssues = self
                .get(
                    "/search/issues",
                    &[("q", q.as_str()), ("sort", "created"), ("order", "desc")],
                )
                .await?;
            Ok(map_search_list(search.items))
        })
        .await
    }
}

//! GitHub REST payloads and their mapping onto domain entities.

use monitor_domain::{
    Collaborator, CollaboratorError, Commit, PullRequest, PullRequestFilter, UserEvent,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct RepoItem {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitItem {
    pub sha: String,
    pub html_url: String,
    pub commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitDetail {
    pub message: String,
    pub author: Option<CommitAuthor>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitAuthor {
    pub name: String,
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventItem {
    #[serde(rename = "type")]
    pub event_type: String,
    pub created_at: String,
    pub repo: EventRepo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventRepo {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PullItem {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub html_url: String,
    pub created_at: String,
    pub merged_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchIssues {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItem {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub html_url: String,
    pub created_at: String,
    pub repository_url: String,
    pub pull_request: Option<SearchPullRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchPullRef {
    pub merged_at: Option<String>,
}

/// Split `owner/name`.
pub(crate) fn split_repo(repo: &str) -> Result<(&str, &str), CollaboratorError> {
    match repo.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner, name))
        }
        _ => Err(CollaboratorError::invalid_input(
            Collaborator::SourceControl,
            "repo must be owner/repo",
        )),
    }
}

/// `state` query value of the repository pulls endpoint, which has no
/// merged state of its own.
pub(crate) fn pulls_state(filter: PullRequestFilter) -> &'static str {
    match filter {
        PullRequestFilter::Merged => "closed",
        other => other.as_str(),
    }
}

/// Search qualifier selecting pull requests in `filter`'s state.
pub(crate) fn search_state_qualifier(filter: PullRequestFilter) -> Option<&'static str> {
    match filter {
        PullRequestFilter::Open => Some("state:open"),
        PullRequestFilter::Closed => Some("state:closed"),
        PullRequestFilter::Merged => Some("is:merged"),
        PullRequestFilter::All => None,
    }
}

pub(crate) fn user_pr_search_query(handle: &str, filter: PullRequestFilter) -> String {
    match search_state_qualifier(filter) {
        Some(state) => format!("author:{handle} type:pr {state}"),
        None => format!("author:{handle} type:pr"),
    }
}

pub(crate) fn map_commits(items: Vec<CommitItem>, repo: &str) -> Vec<Commit> {
    items
        .into_iter()
        .map(|item| {
            let (author, date) = item
                .commit
                .author
                .map(|a| (a.name, a.date))
                .unwrap_or_default();
            Commit {
                repo: repo.to_string(),
                sha: item.sha,
                message: item.commit.message,
                author,
                date,
                url: item.html_url,
            }
        })
        .collect()
}

pub(crate) fn map_events(items: Vec<EventItem>) -> Vec<UserEvent> {
    items
        .into_iter()
        .map(|item| UserEvent {
            event_type: item.event_type,
            created_at: item.created_at,
            repo: item.repo.name,
        })
        .collect()
}

/// Map a repository's pulls. Under the merged filter only merged pull
/// requests are kept.
pub(crate) fn map_pull_list(
    items: Vec<PullItem>,
    repo: &str,
    filter: PullRequestFilter,
) -> Vec<PullRequest> {
    items
        .into_iter()
        .filter(|pr| filter != PullRequestFilter::Merged || pr.merged_at.is_some())
        .map(|pr| PullRequest {
            title: pr.title,
            repo: repo.to_string(),
            number: pr.number,
            state: pr.state,
            url: pr.html_url,
            created_at: pr.created_at,
            merged: pr.merged_at.is_some(),
        })
        .collect()
}

/// `https://api.github.com/repos/acme/api` → `acme/api`
pub(crate) fn repo_from_repository_url(url: &str) -> &str {
    url.split_once("/repos/").map_or(url, |(_, repo)| repo)
}

pub(crate) fn map_search_list(items: Vec<SearchItem>) -> Vec<PullRequest> {
    items
        .into_iter()
        .map(|item| {
            let merged = item
                .pull_request
                .as_ref()
                .is_some_and(|pr| pr.merged_at.is_some())
                || item.state.eq_ignore_ascii_case("merged");
            PullRequest {
                title: item.title,
                repo: repo_from_repository_url(&item.repository_url).to_string(),
                number: item.number,
                state: item.state.to_lowercase(),
                url: item.html_url,
                created_at: item.created_at,
                merged,
            }
        })
        .collect()
}

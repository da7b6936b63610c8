//! Source-control entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A commit authored by a team member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub repo: String,
    pub sha: String,
    pub message: String,
    pub author: String,
    pub date: String,
    pub url: String,
}

/// A pull request opened by a team member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub title: String,
    /// `owner/name`
    pub repo: String,
    pub number: u64,
    pub state: String,
    pub url: String,
    pub created_at: String,
    pub merged: bool,
}

/// Kind of contribution recorded for a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Push,
    PullRequest,
}

impl ActivityType {
    /// Map a public event type to a contribution kind. Other event types
    /// are not contributions.
    pub fn from_event_type(event_type: &str) -> Option<Self> {
        match event_type {
            "PushEvent" => Some(ActivityType::Push),
            "PullRequestEvent" => Some(ActivityType::PullRequest),
            _ => None,
        }
    }
}

/// Most recent contribution of a user to one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoContribution {
    pub repo: String,
    pub last_committed_at: String,
    pub activity_type: ActivityType,
}

/// A public activity event of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub created_at: String,
    /// `owner/name`
    pub repo: String,
}

/// Pull request state filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestFilter {
    #[default]
    Open,
    Closed,
    Merged,
    All,
}

impl PullRequestFilter {
    pub const VALUES: [&'static str; 4] = ["open", "closed", "merged", "all"];

    pub fn as_str(&self) -> &'static str {
        match self {
            PullRequestFilter::Open => "open",
            PullRequestFilter::Closed => "closed",
            PullRequestFilter::Merged => "merged",
            PullRequestFilter::All => "all",
        }
    }
}

impl fmt::Display for PullRequestFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PullRequestFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(PullRequestFilter::Open),
            "closed" => Ok(PullRequestFilter::Closed),
            "merged" => Ok(PullRequestFilter::Merged),
            "all" => Ok(PullRequestFilter::All),
            other => Err(format!("unknown pull request filter: {other}")),
        }
    }
}

/// Time window for commit lookups, as ISO 8601 timestamps
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitWindow {
    pub since: Option<String>,
    pub until: Option<String>,
}

impl CommitWindow {
    pub fn new(since: Option<String>, until: Option<String>) -> Self {
        Self { since, until }
    }
}

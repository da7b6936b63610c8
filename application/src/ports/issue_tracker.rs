//! Issue-tracker port (Jira).

use async_trait::async_trait;
use monitor_domain::{CollaboratorError, Issue, IssueQuery, IssueStatus, IssueUpdate};

#[async_trait]
pub trait IssueTrackerPort: Send + Sync {
    async fn search_issues(&self, query: &IssueQuery) -> Result<Vec<Issue>, CollaboratorError>;

    async fn issue_status(&self, key: &str) -> Result<IssueStatus, CollaboratorError>;

    /// Changelog of `key`, keeping at most `limit` of the most recent entries.
    async fn issue_updates(&self, key: &str, limit: usize)
    -> Result<IssueUpdate, CollaboratorError>;
}

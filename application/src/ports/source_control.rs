//! Source-control port (GitHub).

use async_trait::async_trait;
use monitor_domain::{
    CollaboratorError, Commit, CommitWindow, PullRequest, PullRequestFilter, UserEvent,
};

#[async_trait]
pub trait SourceControlPort: Send + Sync {
    /// Commits authored by `handle`. Without `repo`, every repository of the
    /// user is searched and repositories that fail are skipped.
    async fn user_commits(
        &self,
        handle: &str,
        repo: Option<&str>,
        window: &CommitWindow,
    ) -> Result<Vec<Commit>, CollaboratorError>;

    /// Recent public events of `handle`, newest first.
    async fn user_events(&self, handle: &str) -> Result<Vec<UserEvent>, CollaboratorError>;

    /// Pull requests of one `owner/name` repository.
    async fn repo_pull_requests(
        &self,
        repo: &str,
        filter: PullRequestFilter,
    ) -> Result<Vec<PullRequest>, CollaboratorError>;

    /// Pull requests authored by `handle` across all repositories.
    async fn user_pull_requests(
        &self,
        handle: &str,
        filter: PullRequestFilter,
    ) -> Result<Vec<PullRequest>, CollaboratorError>;
}

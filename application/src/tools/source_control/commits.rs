//! `get_user_commits`

use std::sync::Arc;

use async_trait::async_trait;
use monitor_domain::{CommitWindow, ToolDefinition, ToolError, ToolOutput, ToolParameter};
use serde::Deserialize;

use crate::identity::IdentityResolver;
use crate::ports::source_control::SourceControlPort;
use crate::ports::tool::{Tool, ToolContext};
use crate::tools::args::{decode_arguments, non_empty};

#[derive(Debug, Deserialize)]
struct Args {
    username: Option<String>,
    repo: Option<String>,
    since: Option<String>,
    until: Option<String>,
}

pub struct GetUserCommitsTool {
    source_control: Arc<dyn SourceControlPort>,
    identity: Arc<IdentityResolver>,
}

impl GetUserCommitsTool {
    pub const NAME: &'static str = "get_user_commits";

    pub fn new(source_control: Arc<dyn SourceControlPort>, identity: Arc<IdentityResolver>) -> Self {
        Self {
            source_control,
            identity,
        }
    }
}

#[async_trait]
impl Tool for GetUserCommitsTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            Self::NAME,
            "Fetch GitHub commits for a user, optionally filtered by repo and time range",
        )
        .with_parameter(ToolParameter::new("username", "Team member name", false))
        .with_parameter(ToolParameter::new(
            "repo",
            "Repository name; all of the user's repositories when omitted",
            false,
        ))
        .with_parameter(ToolParameter::new("since", "ISO 8601 start time", false))
        .with_parameter(ToolParameter::new("until", "ISO 8601 end time", false))
    }

    async fn execute(&self, ctx: &ToolContext, arguments: &str) -> Result<ToolOutput, ToolError> {
        let args: Args = decode_arguments(Self::NAME, arguments)?;
        let handle = self.identity.github_handle(args.username.as_deref());
        let repo = non_empty(args.repo);
        let window = CommitWindow::new(non_empty(args.since), non_empty(args.until));

        tracing::debug!(tool = Self::NAME, handle = %handle, repo = ?repo, "Fetching commits");

        let commits = ctx
            .guard(async {
                self.source_control
                    .user_commits(&handle, repo.as_deref(), &window)
                    .await
                    .map_err(ToolError::from)
            })
            .await?;

        Ok(ToolOutput::Commits(commits))
    }
}

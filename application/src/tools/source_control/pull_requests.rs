//! `get_user_prs`

use std::sync::Arc;

use async_trait::async_trait;
use monitor_domain::{PullRequestFilter, ToolDefinition, ToolError, ToolOutput, ToolParameter};
use serde::Deserialize;

use crate::identity::IdentityResolver;
use crate::ports::source_control::SourceControlPort;
use crate::ports::tool::{Tool, ToolContext};
use crate::tools::args::{decode_arguments, non_empty};

#[derive(Debug, Deserialize)]
struct Args {
    username: Option<String>,
    repo: Option<String>,
    filter: Option<String>,
}

pub struct GetUserPrsTool {
    source_control: Arc<dyn SourceControlPort>,
    identity: Arc<IdentityResolver>,
}

impl GetUserPrsTool {
    pub const NAME: &'static str = "get_user_prs";

    pub fn new(source_control: Arc<dyn SourceControlPort>, identity: Arc<IdentityResolver>) -> Self {
        Self {
            source_control,
            identity,
        }
    }
}

#[async_trait]
impl Tool for GetUserPrsTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            Self::NAME,
            "Get pull requests created by a user. Optionally filter by repo and state.",
        )
        .with_parameter(ToolParameter::new("username", "Team member name", false))
        .with_parameter(ToolParameter::new(
            "repo",
            "Repository as owner/name; searches all repositories when omitted",
            false,
        ))
        .with_parameter(
            ToolParameter::new("filter", "Pull request state (default: open)", false)
                .with_allowed_values(PullRequestFilter::VALUES),
        )
    }

    async fn execute(&self, ctx: &ToolContext, arguments: &str) -> Result<ToolOutput, ToolError> {
        let args: Args = decode_arguments(Self::NAME, arguments)?;
        let filter = match non_empty(args.filter) {
            Some(f) => f
                .parse::<PullRequestFilter>()
                .map_err(|e| ToolError::invalid_arguments(Self::NAME, e))?,
            None => PullRequestFilter::default(),
        };
        let handle = self.identity.github_handle(args.username.as_deref());

        let pull_requests = match non_empty(args.repo) {
            Some(repo) => {
                // A bare repository name belongs to the user
                let repo = if repo.contains('/') {
                    repo
                } else {
                    format!("{handle}/{repo}")
                };
                tracing::debug!(tool = Self::NAME, repo = %repo, filter = %filter, "Fetching repository pull requests");
                ctx.guard(async {
                    self.source_control
                        .repo_pull_requests(&repo, filter)
                        .await
                        .map_err(ToolError::from)
                })
                .await?
            }
            None => {
                tracing::debug!(tool = Self::NAME, handle = %handle, filter = %filter, "Searching user pull requests");
                ctx.guard(async {
                    self.source_control
                        .user_pull_requests(&handle, filter)
                        .await
                        .map_err(ToolError::from)
                })
                .await?
            }
        };

        Ok(ToolOutput::PullRequests(pull_requests))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockSourceControl;

    fn tool(port: Arc<MockSourceControl>) -> GetUserPrsTool {
        GetUserPrsTool::new(port, Arc::new(IdentityResolver::new("shubham")))
    }

    #[tokio::test]
    async fn test_defaults_to_open_user_wide_search() {
        let port = Arc::new(MockSourceControl::default());
        tool(port.clone())
            .execute(&ToolContext::new(), "{}")
            .await
            .unwrap();

        assert_eq!(port.requests(), vec!["user_prs handle=shubham filter=open"]);
    }

    #[tokio::test]
    async fn test_repo_lookup_qualifies_bare_name() {
        let port = Arc::new(MockSourceControl::default());
        tool(port.clone())
            .execute(
                &ToolContext::new(),
                r#"{"username":"alice","repo":"widgets","filter":"Merged"}"#,
            )
            .await
            .unwrap();

        assert_eq!(port.requests(), vec!["repo_prs repo=alice/widgets filter=merged"]);
    }

    #[tokio::test]
    async fn test_unknown_filter_is_invalid_arguments() {
        let err = tool(Arc::new(MockSourceControl::default()))
            .execute(&ToolContext::new(), r#"{"filter":"draft"}"#)
            .await
            .unwrap_err();

        assert!(err.is_turn_fatal());
    }

    #[test]
    fn test_definition_lists_filter_values() {
        let def = tool(Arc::new(MockSourceControl::default())).definition();
        let filter = def.parameters.iter().find(|p| p.name == "filter").unwrap();
        assert_eq!(filter.allowed_values, vec!["open", "closed", "merged", "all"]);
    }
}

//! `get_user_issues`

use std::sync::Arc;

use async_trait::async_trait;
use monitor_domain::{IssueQuery, ToolDefinition, ToolError, ToolOutput, ToolParameter};
use serde::Deserialize;

use crate::identity::IdentityResolver;
use crate::ports::issue_tracker::IssueTrackerPort;
use crate::ports::tool::{Tool, ToolContext};
use crate::tools::args::{decode_arguments, non_empty};

#[derive(Debug, Deserialize)]
struct Args {
    assignee: Option<String>,
    status: Option<String>,
    project: Option<String>,
    text: Option<String>,
}

pub struct GetUserIssuesTool {
    issue_tracker: Arc<dyn IssueTrackerPort>,
    identity: Arc<IdentityResolver>,
}

impl GetUserIssuesTool {
    pub const NAME: &'static str = "get_user_issues";

    pub fn new(issue_tracker: Arc<dyn IssueTrackerPort>, identity: Arc<IdentityResolver>) -> Self {
        Self {
            issue_tracker,
            identity,
        }
    }
}

#[async_trait]
impl Tool for GetUserIssuesTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            Self::NAME,
            "Search Jira issues by assignee, status, project or free text",
        )
        .with_parameter(ToolParameter::new("assignee", "Team member name", false))
        .with_parameter(ToolParameter::new("status", "Issue status, e.g. \"In Progress\"", false))
        .with_parameter(ToolParameter::new("project", "Project key", false))
        .with_parameter(ToolParameter::new("text", "Free-text search", false))
    }

    async fn execute(&self, ctx: &ToolContext, arguments: &str) -> Result<ToolOutput, ToolError> {
        let args: Args = decode_arguments(Self::NAME, arguments)?;
        let query = IssueQuery {
            project: non_empty(args.project),
            assignee: Some(self.identity.jira_account(args.assignee.as_deref())),
            status: non_empty(args.status),
            text: non_empty(args.text),
        };

        tracing::debug!(tool = Self::NAME, query = ?query, "Searching issues");

        let issues = ctx
            .guard(async {
                self.issue_tracker
                    .search_issues(&query)
                    .await
                    .map_err(ToolError::from)
            })
            .await?;

        Ok(ToolOutput::Issues(issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockIssueTracker, issue};
    use monitor_domain::UserIdentity;

    fn identity() -> Arc<IdentityResolver> {
        Arc::new(IdentityResolver::new("shubham").with_identity(
            "shubham",
            UserIdentity::new("Shubham", "ShubhamK", "shubhamk922"),
        ))
    }

    #[tokio::test]
    async fn test_assignee_defaults_to_configured_user() {
        let port = Arc::new(MockIssueTracker {
            issues: vec![issue("ENG-1")],
            ..Default::default()
        });
        let tool = GetUserIssuesTool::new(port.clone(), identity());

        let output = tool
            .execute(&ToolContext::new(), r#"{"status":"In Progress","project":""}"#)
            .await
            .unwrap();

        assert_eq!(output, ToolOutput::Issues(vec![issue("ENG-1")]));
        let queries = port.queries.lock().unwrap();
        assert_eq!(queries[0].assignee.as_deref(), Some("ShubhamK"));
        assert_eq!(queries[0].status.as_deref(), Some("In Progress"));
        assert!(queries[0].project.is_none());
    }

    #[tokio::test]
    async fn test_unknown_assignee_is_passed_through() {
        let port = Arc::new(MockIssueTracker::default());
        let tool = GetUserIssuesTool::new(port.clone(), identity());

        tool.execute(&ToolContext::new(), r#"{"assignee":"bob","text":"login"}"#)
            .await
            .unwrap();

        let queries = port.queries.lock().unwrap();
        assert_eq!(queries[0].assignee.as_deref(), Some("bob"));
        assert_eq!(queries[0].text.as_deref(), Some("login"));
    }
}

//! `get_issue_status`

use std::sync::Arc;

use async_trait::async_trait;
use monitor_domain::{ToolDefinition, ToolError, ToolOutput, ToolParameter};
use serde::Deserialize;

use crate::ports::issue_tracker::IssueTrackerPort;
use crate::ports::tool::{Tool, ToolContext};
use crate::tools::args::decode_arguments;

#[derive(Debug, Deserialize)]
struct Args {
    #[serde(rename = "issueKey")]
    issue_key: String,
}

pub struct GetIssueStatusTool {
    issue_tracker: Arc<dyn IssueTrackerPort>,
}

impl GetIssueStatusTool {
    pub const NAME: &'static str = "get_issue_status";

    pub fn new(issue_tracker: Arc<dyn IssueTrackerPort>) -> Self {
        Self { issue_tracker }
    }
}

#[async_trait]
impl Tool for GetIssueStatusTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(Self::NAME, "Get the current status of a Jira issue")
            .with_parameter(ToolParameter::new("issueKey", "Issue key, e.g. ENG-42", true))
    }

    async fn execute(&self, ctx: &ToolContext, arguments: &str) -> Result<ToolOutput, ToolError> {
        let args: Args = decode_arguments(Self::NAME, arguments)?;
        let key = args.issue_key.trim();
        if key.is_empty() {
            return Err(ToolError::invalid_arguments(Self::NAME, "issueKey must not be empty"));
        }

        let status = ctx
            .guard(async {
                self.issue_tracker
                    .issue_status(key)
                    .await
                    .map_err(ToolError::from)
            })
            .await?;

        Ok(ToolOutput::IssueStatus(status))
    }
}

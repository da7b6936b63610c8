//! `get_issue_updates`

use std::sync::Arc;

use async_trait::async_trait;
use monitor_domain::{ToolDefinition, ToolError, ToolOutput, ToolParameter};
use serde::Deserialize;

use crate::ports::issue_tracker::IssueTrackerPort;
use crate::ports::tool::{Tool, ToolContext};
use crate::tools::args::decode_arguments;

const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
struct Args {
    #[serde(rename = "issueKey")]
    issue_key: String,
}

pub struct GetIssueUpdatesTool {
    issue_tracker: Arc<dyn IssueTrackerPort>,
    limit: usize,
}

impl GetIssueUpdatesTool {
    pub const NAME: &'static str = "get_issue_updates";

    pub fn new(issue_tracker: Arc<dyn IssueTrackerPort>) -> Self {
        Self {
            issue_tracker,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Maximum number of changelog entries returned.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

#[async_trait]
impl Tool for GetIssueUpdatesTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(Self::NAME, "Get the recent changelog of a Jira issue")
            .with_parameter(ToolParameter::new("issueKey", "Issue key, e.g. ENG-42", true))
    }

    async fn execute(&self, ctx: &ToolContext, arguments: &str) -> Result<ToolOutput, ToolError> {
        let args: Args = decode_arguments(Self::NAME, arguments)?;
        let key = args.issue_key.trim();
        if key.is_empty() {
            return Err(ToolError::invalid_arguments(Self::NAME, "issueKey must not be empty"));
        }

        let update = ctx
            .guard(async {
                self.issue_tracker
                    .issue_updates(key, self.limit)
                    .await
                    .map_err(ToolError::from)
            })
            .await?;

        Ok(ToolOutput::IssueUpdates(update))
    }
}

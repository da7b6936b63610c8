//! `get_member_activity`: concurrent aggregation
//!
//! Runs one sub-tool per [`ActivityStep`] and merges their outputs into a
//! [`MemberActivity`].
//!
//! ```text
//!                       ┌─▶ get_user_issues  {"assignee": name} ─▶ ActivityPart::Issues
//! get_member_activity ──┤
//!                       └─▶ get_user_commits {"username": name} ─▶ ActivityPart::Commits
//! ```
//!
//! Each unit runs in its own task under a child of the request's
//! cancellation token. The driver drains the `JoinSet` until every launched
//! unit has reported, so failures, panics and cancellation never leave a
//! unit behind. A failing unit does not cancel its siblings; if any unit
//! failed the partial aggregate is returned inside
//! [`ToolError::Aggregate`], with failures in completion order.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use monitor_domain::{
    ActivityPart, AggregateError, MemberActivity, SubToolFailure, ToolDefinition, ToolError,
    ToolOutput, ToolParameter,
};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::AggregationMode;
use crate::identity::IdentityResolver;
use crate::ports::tool::{Tool, ToolContext};
use crate::tools::args::decode_arguments;
use crate::tools::issue_tracker::GetUserIssuesTool;
use crate::tools::registry::ToolRegistry;
use crate::tools::source_control::GetUserCommitsTool;

/// Aggregate field a step fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityField {
    Issues,
    Commits,
}

impl ActivityField {
    fn expected(&self) -> &'static str {
        match self {
            ActivityField::Issues => "issues",
            ActivityField::Commits => "commits",
        }
    }

    /// Argument payload for the sub-tool that fills this field.
    pub fn payload(&self, name: &str) -> String {
        match self {
            ActivityField::Issues => json!({ "assignee": name }),
            ActivityField::Commits => json!({ "username": name }),
        }
        .to_string()
    }

    /// Tag a sub-tool output with this field, rejecting outputs of another kind.
    pub fn extract(self, tool: &str, output: ToolOutput) -> Result<ActivityPart, ToolError> {
        match (self, output) {
            (ActivityField::Issues, ToolOutput::Issues(issues)) => Ok(ActivityPart::Issues(issues)),
            (ActivityField::Commits, ToolOutput::Commits(commits)) => {
                Ok(ActivityPart::Commits(commits))
            }
            (field, other) => Err(ToolError::UnexpectedOutput {
                tool: tool.to_string(),
                expected: field.expected(),
                actual: other.kind(),
            }),
        }
    }
}

/// One sub-tool of the aggregation and the field it fills
#[derive(Clone)]
pub struct ActivityStep {
    tool: Arc<dyn Tool>,
    field: ActivityField,
}

impl ActivityStep {
    pub fn new(tool: Arc<dyn Tool>, field: ActivityField) -> Self {
        Self { tool, field }
    }

    pub fn tool_name(&self) -> &str {
        self.tool.name()
    }

    pub fn field(&self) -> ActivityField {
        self.field
    }
}

#[derive(Error, Debug)]
#[error("sub-tool {0} is not registered")]
pub struct MissingSubTool(pub String);

#[derive(Debug, Deserialize)]
struct Args {
    username: Option<String>,
}

pub struct MemberActivityTool {
    steps: Vec<ActivityStep>,
    identity: Arc<IdentityResolver>,
    mode: AggregationMode,
}

impl MemberActivityTool {
    pub const NAME: &'static str = "get_member_activity";

    pub fn new(steps: Vec<ActivityStep>, identity: Arc<IdentityResolver>) -> Self {
        Self {
            steps,
            identity,
            mode: AggregationMode::default(),
        }
    }

    /// Issue and commit steps, resolved from an already built registry.
    pub fn from_registry(
        registry: &ToolRegistry,
        identity: Arc<IdentityResolver>,
    ) -> Result<Self, MissingSubTool> {
        let lookup = |name: &str| {
            registry
                .get(name)
                .ok_or_else(|| MissingSubTool(name.to_string()))
        };
        let steps = vec![
            ActivityStep::new(lookup(GetUserIssuesTool::NAME)?, ActivityField::Issues),
            ActivityStep::new(lookup(GetUserCommitsTool::NAME)?, ActivityField::Commits),
        ];
        Ok(Self::new(steps, identity))
    }

    pub fn with_mode(mut self, mode: AggregationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn steps(&self) -> &[ActivityStep] {
        &self.steps
    }

    /// Build the aggregate for `name`.
    pub async fn aggregate(
        &self,
        ctx: &ToolContext,
        name: &str,
    ) -> Result<MemberActivity, AggregateError> {
        let (activity, failures) = match self.mode {
            AggregationMode::Concurrent => self.run_concurrent(ctx, name).await,
            AggregationMode::Sequential => self.run_sequential(ctx, name).await,
        };

        info!(
            member = %name,
            mode = %self.mode,
            issues = activity.issues.len(),
            commits = activity.commits.len(),
            failures = failures.len(),
            "Member activity aggregated"
        );

        if failures.is_empty() {
            Ok(activity)
        } else {
            Err(AggregateError::new(activity, failures))
        }
    }

    async fn run_concurrent(
        &self,
        ctx: &ToolContext,
        name: &str,
    ) -> (MemberActivity, Vec<SubToolFailure>) {
        let mut activity = MemberActivity::new(name);
        let mut failures = Vec::new();
        let mut join_set = JoinSet::new();
        let mut launched = HashMap::with_capacity(self.steps.len());

        for step in &self.steps {
            let tool = Arc::clone(&step.tool);
            let field = step.field;
            let payload = field.payload(name);
            let unit_ctx = ctx.child();

            let handle = join_set.spawn(async move {
                let result = run_step(&unit_ctx, tool.as_ref(), field, &payload).await;
                (tool.name().to_string(), result)
            });
            launched.insert(handle.id(), step.tool_name().to_string());
        }

        debug!(units = launched.len(), "Launched activity sub-tools");

        let mut completed = 0usize;
        while let Some(joined) = join_set.join_next().await {
            completed += 1;
            match joined {
                Ok((tool, Ok(part))) => {
                    debug!(tool = %tool, field = part.field(), "Sub-tool completed");
                    activity.merge(part);
                }
                Ok((tool, Err(error))) => {
                    warn!(tool = %tool, error = %error, "Sub-tool failed");
                    failures.push(SubToolFailure::new(tool, error));
                }
                Err(e) => {
                    let tool = launched
                        .get(&e.id())
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string());
                    warn!(tool = %tool, error = %e, "Sub-tool task join error");
                    failures.push(SubToolFailure::new(
                        tool,
                        ToolError::Internal(format!("sub-tool task failed: {e}")),
                    ));
                }
            }
        }

        debug!(completed, launched = launched.len(), "Drained activity sub-tools");
        (activity, failures)
    }

    async fn run_sequential(
        &self,
        ctx: &ToolContext,
        name: &str,
    ) -> (MemberActivity, Vec<SubToolFailure>) {
        let mut activity = MemberActivity::new(name);
        let mut failures = Vec::new();

        for step in &self.steps {
            let payload = step.field.payload(name);
            match run_step(&ctx.child(), step.tool.as_ref(), step.field, &payload).await {
                Ok(part) => activity.merge(part),
                Err(error) => {
                    warn!(tool = step.tool_name(), error = %error, "Sub-tool failed");
                    failures.push(SubToolFailure::new(step.tool_name(), error));
                }
            }
        }

        (activity, failures)
    }
}

async fn run_step(
    ctx: &ToolContext,
    tool: &dyn Tool,
    field: ActivityField,
    payload: &str,
) -> Result<ActivityPart, ToolError> {
    let output = ctx.guard(tool.execute(ctx, payload)).await?;
    field.extract(tool.name(), output)
}

#[async_trait]
impl Tool for MemberActivityTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(Self::NAME, "Get Git and Jira activity summary for a user")
            .with_parameter(ToolParameter::new("username", "Team member name", true))
    }

    async fn execute(&self, ctx: &ToolContext, arguments: &str) -> Result<ToolOutput, ToolError> {
        let args: Args = decode_arguments(Self::NAME, arguments)?;
        let name = self.identity.name_or_default(args.username.as_deref());

        match self.aggregate(ctx, name).await {
            Ok(activity) => Ok(ToolOutput::MemberActivity(activity)),
            Err(partial) => Err(partial.into()),
        }
    }
}

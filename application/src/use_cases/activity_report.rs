//! Activity report use case
//!
//! Runs the member activity aggregation directly, without asking the model
//! which tool to use, and optionally has the model summarize the result.

use std::sync::Arc;
use std::time::Duration;

use monitor_domain::{MemberActivity, ToolError, ToolOutput};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::ports::ai_gateway::{AiGateway, GatewayError};
use crate::ports::tool::ToolContext;
use crate::tools::member_activity::MemberActivityTool;
use crate::tools::registry::ToolRegistry;

#[derive(Error, Debug)]
pub enum ActivityReportError {
    #[error("{} is not registered", MemberActivityTool::NAME)]
    NotRegistered,

    #[error(transparent)]
    Tool(ToolError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Input for the activity report use case
#[derive(Debug, Clone, Default)]
pub struct ActivityReportInput {
    /// Team member; the default user when `None`
    pub username: Option<String>,
    /// Ask the model for a narrative summary
    pub summarize: bool,
}

impl ActivityReportInput {
    pub fn new(username: Option<String>) -> Self {
        Self {
            username,
            summarize: false,
        }
    }

    pub fn with_summary(mut self) -> Self {
        self.summarize = true;
        self
    }
}

/// Aggregated activity plus whatever went wrong collecting it
#[derive(Debug, Clone, Serialize)]
pub struct ActivityReport {
    pub activity: MemberActivity,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

pub struct ActivityReportUseCase<G: AiGateway + 'static> {
    gateway: Arc<G>,
    registry: ToolRegistry,
    timeout: Option<Duration>,
}

impl<G: AiGateway + 'static> ActivityReportUseCase<G> {
    pub fn new(gateway: Arc<G>, registry: ToolRegistry) -> Self {
        Self {
            gateway,
            registry,
            timeout: None,
        }
    }

    /// Deadline for collecting the activity; unfinished lookups are reported
    /// as `deadline exceeded`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn execute(
        &self,
        input: ActivityReportInput,
        token: CancellationToken,
    ) -> Result<ActivityReport, ActivityReportError> {
        let tool = self
            .registry
            .get(MemberActivityTool::NAME)
            .ok_or(ActivityReportError::NotRegistered)?;

        let arguments = json!({ "username": input.username }).to_string();
        let mut ctx = ToolContext::new().with_cancellation(token);
        if let Some(timeout) = self.timeout {
            ctx = ctx.with_timeout(timeout);
        }

        let (activity, failures) = match tool.execute(&ctx, &arguments).await {
            Ok(ToolOutput::MemberActivity(activity)) => (activity, Vec::new()),
            Ok(other) => {
                return Err(ActivityReportError::Tool(ToolError::UnexpectedOutput {
                    tool: MemberActivityTool::NAME.to_string(),
                    expected: "member_activity",
                    actual: other.kind(),
                }));
            }
            Err(ToolError::Aggregate(agg)) => {
                let failures = agg.failures().iter().map(|f| f.to_string()).collect();
                (agg.into_partial(), failures)
            }
            Err(e) => return Err(ActivityReportError::Tool(e)),
        };

        for failure in &failures {
            warn!(member = %activity.name, failure = %failure, "Activity incomplete");
        }

        let summary = if input.summarize {
            info!(member = %activity.name, "Summarizing activity");
            Some(self.gateway.summarize_activity(&activity).await?)
        } else {
            None
        };

        Ok(ActivityReport {
            activity,
            failures,
            summary,
        })
    }
}

//! Tool domain value objects: typed outputs and the result handed back to the model

use crate::activity::MemberActivity;
use crate::issue_tracker::{Issue, IssueStatus, IssueUpdate};
use crate::source_control::{Commit, PullRequest, RepoContribution};
use crate::tool::error::ToolError;
use serde::Serialize;
use serde_json::{Value, json};

/// Typed result of a successful tool execution.
///
/// Serializes as the bare payload, which is what the completion call shows
/// the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    Commits(Vec<Commit>),
    PullRequests(Vec<PullRequest>),
    ContributedRepos(Vec<RepoContribution>),
    Issues(Vec<Issue>),
    IssueStatus(IssueStatus),
    IssueUpdates(IssueUpdate),
    MemberActivity(MemberActivity),
}

impl ToolOutput {
    pub fn kind(&self) -> &'static str {
        match self {
            ToolOutput::Commits(_) => "commits",
            ToolOutput::PullRequests(_) => "pull_requests",
            ToolOutput::ContributedRepos(_) => "contributed_repos",
            ToolOutput::Issues(_) => "issues",
            ToolOutput::IssueStatus(_) => "issue_status",
            ToolOutput::IssueUpdates(_) => "issue_updates",
            ToolOutput::MemberActivity(_) => "member_activity",
        }
    }
}

/// What the completion call receives for an executed tool.
///
/// Execution errors are carried as values so the model can narrate them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolResult {
    Success(ToolOutput),
    Failure {
        error: String,
    },
    /// Aggregation that produced data and also an error
    Partial {
        result: ToolOutput,
        error: String,
    },
}

impl ToolResult {
    pub fn from_execution(result: Result<ToolOutput, ToolError>) -> Self {
        match result {
            Ok(output) => ToolResult::Success(output),
            Err(ToolError::Aggregate(agg)) => {
                let error = agg.to_string();
                ToolResult::Partial {
                    result: ToolOutput::MemberActivity(agg.into_partial()),
                    error,
                }
            }
            Err(e) => ToolResult::Failure {
                error: e.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolResult::Success(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ToolResult::Success(_) => None,
            ToolResult::Failure { error } | ToolResult::Partial { error, .. } => Some(error),
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|e| json!({ "error": e.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::error::{AggregateError, Collaborator, CollaboratorError, SubToolFailure};

    fn issue(key: &str) -> Issue {
        Issue {
            key: key.to_string(),
            id: "10001".to_string(),
            summary: "Fix login".to_string(),
            status: "In Progress".to_string(),
        }
    }

    #[test]
    fn test_success_serializes_bare_payload() {
        let result = ToolResult::from_execution(Ok(ToolOutput::Issues(vec![issue("ENG-1")])));
        let json = result.to_json();

        assert!(result.is_success());
        assert_eq!(json[0]["key"], "ENG-1");
        assert_eq!(json[0]["status"], "In Progress");
    }

    #[test]
    fn test_collaborator_failure_becomes_value() {
        let result = ToolResult::from_execution(Err(
            CollaboratorError::timeout(Collaborator::IssueTracker).into()
        ));

        assert_eq!(result.error(), Some("timeout"));
        assert_eq!(result.to_json(), json!({ "error": "timeout" }));
    }

    #[test]
    fn test_aggregate_failure_keeps_partial_data() {
        let mut partial = MemberActivity::new("bob");
        partial.issues = vec![issue("ENG-1"), issue("ENG-2")];
        let err = AggregateError::new(
            partial,
            vec![SubToolFailure::new(
                "get_user_commits",
                CollaboratorError::timeout(Collaborator::SourceControl).into(),
            )],
        );

        let result = ToolResult::from_execution(Err(err.into()));
        let json = result.to_json();

        assert_eq!(json["error"], "get_user_commits failed: timeout");
        assert_eq!(json["result"]["name"], "bob");
        assert_eq!(json["result"]["issues"].as_array().map(Vec::len), Some(2));
        assert!(json["result"].get("commits").is_none());
    }

    #[test]
    fn test_output_kind() {
        assert_eq!(ToolOutput::Commits(vec![]).kind(), "commits");
        assert_eq!(
            ToolOutput::MemberActivity(MemberActivity::new("a")).kind(),
            "member_activity"
        );
    }
}

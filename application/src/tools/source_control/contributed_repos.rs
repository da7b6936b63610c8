//! `get_user_contributed_repos`

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use monitor_domain::{
    ActivityType, RepoContribution, ToolDefinition, ToolError, ToolOutput, ToolParameter,
    UserEvent,
};
use serde::Deserialize;

use crate::identity::IdentityResolver;
use crate::ports::source_control::SourceControlPort;
use crate::ports::tool::{Tool, ToolContext};
use crate::tools::args::{decode_arguments, non_empty};

#[derive(Debug, Deserialize)]
struct Args {
    username: Option<String>,
    since: Option<String>,
}

/// Reduce public events to one contribution per repository.
///
/// Only pushes and pull request events count. Events older than `since` are
/// dropped; an unparseable `since` is ignored. For each repository the most
/// recent event wins. The result is sorted newest first.
pub fn contributions_from_events(events: &[UserEvent], since: Option<&str>) -> Vec<RepoContribution> {
    let since = since.and_then(|s| DateTime::parse_from_rfc3339(s).ok());
    let mut latest: HashMap<&str, (DateTime<FixedOffset>, RepoContribution)> = HashMap::new();

    for event in events {
        let Some(activity_type) = ActivityType::from_event_type(&event.event_type) else {
            continue;
        };
        let Ok(created_at) = DateTime::parse_from_rfc3339(&event.created_at) else {
            continue;
        };
        if since.is_some_and(|since| created_at < since) {
            continue;
        }

        let newer = latest
            .get(event.repo.as_str())
            .is_none_or(|(seen, _)| created_at > *seen);
        if newer {
            latest.insert(
                &event.repo,
                (
                    created_at,
                    RepoContribution {
                        repo: event.repo.clone(),
                        last_committed_at: event.created_at.clone(),
                        activity_type,
                    },
                ),
            );
        }
    }

    let mut contributions: Vec<_> = latest.into_values().collect();
    contributions.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.repo.cmp(&b.1.repo)));
    contributions.into_iter().map(|(_, c)| c).collect()
}

pub struct GetUserContributedReposTool {
    source_control: Arc<dyn SourceControlPort>,
    identity: Arc<IdentityResolver>,
}

impl GetUserContributedReposTool {
    pub const NAME: &'static str = "get_user_contributed_repos";

    pub fn new(source_control: Arc<dyn SourceControlPort>, identity: Arc<IdentityResolver>) -> Self {
        Self {
            source_control,
            identity,
        }
    }
}

#[async_trait]
impl Tool for GetUserContributedReposTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            Self::NAME,
            "Get repositories a user recently pushed to or opened pull requests in",
        )
        .with_parameter(ToolParameter::new("username", "Team member name", false))
        .with_parameter(ToolParameter::new(
            "since",
            "RFC 3339 time; only activity after it is counted",
            false,
        ))
    }

    async fn execute(&self, ctx: &ToolContext, arguments: &str) -> Result<ToolOutput, ToolError> {
        let args: Args = decode_arguments(Self::NAME, arguments)?;
        let handle = self.identity.github_handle(args.username.as_deref());
        let since = non_empty(args.since);

        let events = ctx
            .guard(async {
                self.source_control
                    .user_events(&handle)
                    .await
                    .map_err(ToolError::from)
            })
            .await?;

        let contributions = contributions_from_events(&events, since.as_deref());
        tracing::debug!(
            tool = Self::NAME,
            handle = %handle,
            events = events.len(),
            repos = contributions.len(),
            "Reduced events to contributions"
        );
        Ok(ToolOutput::ContributedRepos(contributions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockSourceControl;

    fn event(event_type: &str, repo: &str, created_at: &str) -> UserEvent {
        UserEvent {
            event_type: event_type.to_string(),
            created_at: created_at.to_string(),
            repo: repo.to_string(),
        }
    }

    #[test]
    fn test_only_pushes_and_pull_requests_count() {
        let events = vec![
            event("WatchEvent", "octo/stars", "2025-03-02T10:00:00Z"),
            event("PushEvent", "octo/api", "2025-03-02T09:00:00Z"),
            event("PullRequestEvent", "octo/web", "2025-03-01T09:00:00Z"),
        ];

        let contributions = contributions_from_events(&events, None);

        assert_eq!(contributions.len(), 2);
        assert_eq!(contributions[0].repo, "octo/api");
        assert_eq!(contributions[0].activity_type, ActivityType::Push);
        assert_eq!(contributions[1].activity_type, ActivityType::PullRequest);
    }

    #[test]
    fn test_deduplicates_keeping_latest_event() {
        let events = vec![
            event("PushEvent", "octo/api", "2025-03-03T09:00:00Z"),
            event("PullRequestEvent", "octo/api", "2025-03-01T09:00:00Z"),
        ];

        let contributions = contributions_from_events(&events, None);

        assert_eq!(contributions.len(), 1);
        assert_eq!(contributions[0].last_committed_at, "2025-03-03T09:00:00Z");
        assert_eq!(contributions[0].activity_type, ActivityType::Push);
    }

    #[test]
    fn test_since_filters_older_events() {
        let events = vec![
            event("PushEvent", "octo/api", "2025-03-03T09:00:00Z"),
            event("PushEvent", "octo/old", "2025-01-01T09:00:00Z"),
        ];

        let contributions = contributions_from_events(&events, Some("2025-03-01T00:00:00+00:00"));
        assert_eq!(contributions.len(), 1);
        assert_eq!(contributions[0].repo, "octo/api");

        let unfiltered = contributions_from_events(&events, Some("last week"));
        assert_eq!(unfiltered.len(), 2);
    }

    #[tokio::test]
    async fn test_execute_reads_events_for_resolved_handle() {
        let port = Arc::new(MockSourceControl {
            events: vec![event("PushEvent", "octo/api", "2025-03-03T09:00:00Z")],
            ..Default::default()
        });
        let tool =
            GetUserContributedReposTool::new(port.clone(), Arc::new(IdentityResolver::new("dana")));

        let output = tool.execute(&ToolContext::new(), "").await.unwrap();

        assert_eq!(port.requests(), vec!["events handle=dana"]);
        assert!(matches!(output, ToolOutput::ContributedRepos(ref c) if c.len() == 1));
    }
}

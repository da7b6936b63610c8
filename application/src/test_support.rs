//! Hand-written mocks shared by the unit tests of this crate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use monitor_domain::{
    AiResponse, Collaborator, CollaboratorError, Commit, CommitWindow, Issue, IssueQuery,
    IssueStatus, IssueUpdate, MemberActivity, Message, PullRequest, PullRequestFilter, ToolCall,
    ToolDefinition, ToolError, ToolOutput, ToolResult, UserEvent,
};

use crate::ports::ai_gateway::{AiGateway, GatewayError};
use crate::ports::issue_tracker::IssueTrackerPort;
use crate::ports::source_control::SourceControlPort;
use crate::ports::tool::{Tool, ToolContext};

pub fn commit(repo: &str, sha: &str) -> Commit {
    Commit {
        repo: repo.to_string(),
        sha: sha.to_string(),
        message: format!("commit {sha}"),
        author: "Alice".to_string(),
        date: "2025-03-03T12:00:00Z".to_string(),
        url: format!("https://github.com/alice/{repo}/commit/{sha}"),
    }
}

pub fn issue(key: &str) -> Issue {
    Issue {
        key: key.to_string(),
        id: key.trim_start_matches("ENG-").to_string(),
        summary: format!("Work item {key}"),
        status: "In Progress".to_string(),
    }
}

// ==================== Tools ====================

struct FinishGuard(Arc<AtomicUsize>);

impl Drop for FinishGuard {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Tool returning a fixed response after an optional delay.
///
/// `finished` counts executions that ran to completion or were dropped, so
/// `calls == finished` means no execution is still pending.
pub struct StubTool {
    name: String,
    response: Result<ToolOutput, ToolError>,
    delay: Duration,
    calls: Arc<AtomicUsize>,
    finished: Arc<AtomicUsize>,
    arguments: Arc<Mutex<Vec<String>>>,
}

impl StubTool {
    pub fn new(name: &str, output: ToolOutput) -> Self {
        Self::with_response(name, Ok(output))
    }

    pub fn failing(name: &str, error: ToolError) -> Self {
        Self::with_response(name, Err(error))
    }

    fn with_response(name: &str, response: Result<ToolOutput, ToolError>) -> Self {
        Self {
            name: name.to_string(),
            response,
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
            finished: Arc::new(AtomicUsize::new(0)),
            arguments: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn finished(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.finished)
    }

    pub fn arguments(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.arguments)
    }
}

#[async_trait]
impl Tool for StubTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(&self.name, format!("Stub for {}", self.name))
    }

    async fn execute(&self, _ctx: &ToolContext, arguments: &str) -> Result<ToolOutput, ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.arguments.lock().unwrap().push(arguments.to_string());
        let _guard = FinishGuard(Arc::clone(&self.finished));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.response.clone()
    }
}

// ==================== Gateway ====================

pub struct MockGateway {
    decision: AiResponse,
    completion: Option<String>,
    pub chat_calls: AtomicUsize,
    pub completion_calls: AtomicUsize,
    pub offered_tools: Mutex<Vec<String>>,
    pub last_messages: Mutex<Vec<Message>>,
    pub last_result: Mutex<Option<ToolResult>>,
}

impl MockGateway {
    pub fn answering(content: &str) -> Self {
        Self::new(AiResponse::Content(content.to_string()), None)
    }

    pub fn calling(call: ToolCall, completion: &str) -> Self {
        Self::new(AiResponse::ToolCall(call), Some(completion.to_string()))
    }

    /// Requests `call`, then fails the completion request.
    pub fn calling_then_failing(call: ToolCall) -> Self {
        Self::new(AiResponse::ToolCall(call), None)
    }

    fn new(decision: AiResponse, completion: Option<String>) -> Self {
        Self {
            decision,
            completion,
            chat_calls: AtomicUsize::new(0),
            completion_calls: AtomicUsize::new(0),
            offered_tools: Mutex::new(Vec::new()),
            last_messages: Mutex::new(Vec::new()),
            last_result: Mutex::new(None),
        }
    }
}

#[async_trait]
impl AiGateway for MockGateway {
    async fn chat(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<AiResponse, GatewayError> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().unwrap() = messages.to_vec();
        *self.offered_tools.lock().unwrap() = tools.iter().map(|t| t.name.clone()).collect();
        Ok(self.decision.clone())
    }

    async fn complete_tool(
        &self,
        _call: &ToolCall,
        result: &ToolResult,
    ) -> Result<String, GatewayError> {
        self.completion_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_result.lock().unwrap() = Some(result.clone());
        self.completion
            .clone()
            .ok_or_else(|| GatewayError::Unavailable("503 from provider".to_string()))
    }

    async fn summarize_activity(&self, activity: &MemberActivity) -> Result<String, GatewayError> {
        Ok(format!(
            "{} has {} issues and {} commits.",
            activity.name,
            activity.issues.len(),
            activity.commits.len()
        ))
    }
}

// ==================== Source control ====================

#[derive(Default)]
pub struct MockSourceControl {
    pub commits: Vec<Commit>,
    pub events: Vec<UserEvent>,
    pub pull_requests: Vec<PullRequest>,
    pub fail_with: Option<CollaboratorError>,
    pub requests: Mutex<Vec<String>>,
}

impl MockSourceControl {
    fn record(&self, request: String) -> Result<(), CollaboratorError> {
        self.requests.lock().unwrap().push(request);
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SourceControlPort for MockSourceControl {
    async fn user_commits(
        &self,
        handle: &str,
        repo: Option<&str>,
        window: &CommitWindow,
    ) -> Result<Vec<Commit>, CollaboratorError> {
        self.record(format!(
            "commits handle={handle} repo={} since={}",
            repo.unwrap_or("*"),
            window.since.as_deref().unwrap_or("-")
        ))?;
        Ok(self.commits.clone())
    }

    async fn user_events(&self, handle: &str) -> Result<Vec<UserEvent>, CollaboratorError> {
        self.record(format!("events handle={handle}"))?;
        Ok(self.events.clone())
    }

    async fn repo_pull_requests(
        &self,
        repo: &str,
        filter: PullRequestFilter,
    ) -> Result<Vec<PullRequest>, CollaboratorError> {
        self.record(format!("repo_prs repo={repo} filter={filter}"))?;
        Ok(self.pull_requests.clone())
    }

    async fn user_pull_requests(
        &self,
        handle: &str,
        filter: PullRequestFilter,
    ) -> Result<Vec<PullRequest>, CollaboratorError> {
        self.record(format!("user_prs handle={handle} filter={filter}"))?;
        Ok(self.pull_requests.clone())
    }
}

// ==================== Issue tracker ====================

#[derive(Default)]
pub struct MockIssueTracker {
    pub issues: Vec<Issue>,
    pub update: Option<IssueUpdate>,
    pub fail_with: Option<CollaboratorError>,
    pub queries: Mutex<Vec<IssueQuery>>,
    pub limits: Mutex<Vec<usize>>,
}

#[async_trait]
impl IssueTrackerPort for MockIssueTracker {
    async fn search_issues(&self, query: &IssueQuery) -> Result<Vec<Issue>, CollaboratorError> {
        self.queries.lock().unwrap().push(query.clone());
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(self.issues.clone()),
        }
    }

    async fn issue_status(&self, key: &str) -> Result<IssueStatus, CollaboratorError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        self.issues
            .iter()
            .find(|i| i.key == key)
            .map(|i| IssueStatus {
                key: i.key.clone(),
                status: i.status.clone(),
            })
            .ok_or_else(|| CollaboratorError::status(Collaborator::IssueTracker, 404, "not found"))
    }

    async fn issue_updates(
        &self,
        key: &str,
        limit: usize,
    ) -> Result<IssueUpdate, CollaboratorError> {
        self.limits.lock().unwrap().push(limit);
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        Ok(self.update.clone().unwrap_or(IssueUpdate {
            issue_key: key.to_string(),
            updates: Vec::new(),
        }))
    }
}

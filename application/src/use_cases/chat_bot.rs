//! Chat bot use case
//!
//! Runs one user turn:
//!
//! ```text
//! START ─▶ DECIDING ──content──────────────────────────────▶ DONE
//!              │
//!              └─tool call─▶ DISPATCHING ─▶ COMPLETING ─────▶ DONE
//!                                │               │
//!                          unknown tool /   provider failure
//!                          bad arguments    ─▶ fallback answer
//!                            ─▶ error
//! ```
//!
//! At most one tool runs per turn and the model is asked at most twice.

use std::sync::Arc;

use monitor_domain::{AiResponse, Message, ToolError, ToolResult};
use serde_json::json;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::ChatBotConfig;
use crate::ports::ai_gateway::{AiGateway, GatewayError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::tool::ToolContext;
use crate::tools::registry::ToolRegistry;

/// Errors that end a chat turn
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error(transparent)]
    InvalidArguments(ToolError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Use case for answering one user utterance
pub struct ChatBotUseCase<G: AiGateway + 'static> {
    gateway: Arc<G>,
    registry: ToolRegistry,
    config: ChatBotConfig,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: AiGateway + 'static> ChatBotUseCase<G> {
    pub fn new(gateway: Arc<G>, registry: ToolRegistry) -> Self {
        Self {
            gateway,
            registry,
            config: ChatBotConfig::default(),
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_config(mut self, config: ChatBotConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Answer one utterance.
    pub async fn handle(&self, utterance: &str) -> Result<String, ChatError> {
        self.handle_with_cancellation(utterance, CancellationToken::new())
            .await
    }

    /// Answer one utterance; cancelling `token` stops the running tool.
    pub async fn handle_with_cancellation(
        &self,
        utterance: &str,
        token: CancellationToken,
    ) -> Result<String, ChatError> {
        let mut ctx = ToolContext::new().with_cancellation(token);
        if let Some(timeout) = self.config.turn_timeout {
            ctx = ctx.with_timeout(timeout);
        }

        // START
        let messages = vec![
            Message::system(&self.config.system_prompt),
            Message::user(utterance),
        ];
        self.logger.log(ConversationEvent::new(
            "user_message",
            json!({ "content": utterance }),
        ));

        // DECIDING
        let definitions = self.registry.definitions();
        debug!(tools = definitions.len(), "Asking model for a decision");
        let call = match self.gateway.chat(&messages, &definitions).await? {
            AiResponse::Content(content) => {
                debug!("Model answered directly");
                self.log_answer(&content);
                return Ok(content);
            }
            AiResponse::ToolCall(call) => call,
        };

        // DISPATCHING
        info!(tool = %call.name, "Model requested tool");
        self.logger.log(ConversationEvent::new(
            "tool_call",
            json!({ "id": call.id, "name": call.name, "arguments": call.arguments }),
        ));

        let Some(tool) = self.registry.get(&call.name) else {
            warn!(tool = %call.name, "Model requested an unknown tool");
            return Err(ChatError::UnknownTool(call.name));
        };

        let result = match tool.execute(&ctx, &call.arguments).await {
            Err(e) if e.is_turn_fatal() => {
                warn!(tool = %call.name, error = %e, "Tool rejected its arguments");
                return Err(ChatError::InvalidArguments(e));
            }
            other => ToolResult::from_execution(other),
        };

        if let Some(error) = result.error() {
            warn!(tool = %call.name, error = %error, "Tool failed, forwarding error to model");
        }
        self.logger.log(ConversationEvent::new(
            "tool_result",
            json!({ "name": call.name, "result": result.to_json() }),
        ));

        // COMPLETING
        match self.gateway.complete_tool(&call, &result).await {
            Ok(content) => {
                self.log_answer(&content);
                Ok(content)
            }
            Err(e) => {
                warn!(error = %e, "Completion request failed, returning fallback answer");
                self.logger.log(ConversationEvent::new(
                    "fallback",
                    json!({ "error": e.to_string() }),
                ));
                Ok(self.config.fallback_message.clone())
            }
        }
    }

    fn log_answer(&self, content: &str) {
        self.logger.log(ConversationEvent::new(
            "assistant_response",
            json!({ "content": content }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::IdentityResolver;
    use crate::test_support::{MockGateway, StubTool, commit, issue};
    use crate::tools::member_activity::{ActivityField, ActivityStep, MemberActivityTool};
    use monitor_domain::{Collaborator, CollaboratorError, Role, ToolCall, ToolOutput};
    use std::sync::Mutex;
    use std::sync::atomic::Ordering;

    struct RecordingLogger(Mutex<Vec<&'static str>>);

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.0.lock().unwrap().push(event.event_type);
        }
    }

    fn commits_registry(tool: StubTool) -> ToolRegistry {
        ToolRegistry::builder().register(tool).build()
    }

    fn three_commits() -> ToolOutput {
        ToolOutput::Commits(vec![
            commit("api", "a1"),
            commit("api", "a2"),
            commit("web", "w1"),
        ])
    }

    #[tokio::test]
    async fn test_tool_call_is_dispatched_and_narrated() {
        let tool = StubTool::new("get_user_commits", three_commits());
        let args = tool.arguments();
        let gateway = Arc::new(MockGateway::calling(
            ToolCall::new("get_user_commits", r#"{"username":"alice"}"#).with_id("call_1"),
            "Alice pushed 3 commits this week.",
        ));
        let use_case = ChatBotUseCase::new(gateway.clone(), commits_registry(tool));

        let answer = use_case.handle("show my commits").await.unwrap();

        assert_eq!(answer, "Alice pushed 3 commits this week.");
        assert_eq!(*args.lock().unwrap(), vec![r#"{"username":"alice"}"#]);
        assert_eq!(gateway.completion_calls.load(Ordering::SeqCst), 1);
        let result = gateway.last_result.lock().unwrap().clone().unwrap();
        assert_eq!(result, ToolResult::Success(three_commits()));

        let messages = gateway.last_messages.lock().unwrap().clone();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].content, "show my commits");
    }

    #[tokio::test]
    async fn test_plain_content_is_returned_unchanged() {
        let tool = StubTool::new("get_user_commits", three_commits());
        let calls = tool.calls();
        let gateway = Arc::new(MockGateway::answering("Hi, how can I help?"));
        let use_case = ChatBotUseCase::new(gateway.clone(), commits_registry(tool));

        let answer = use_case.handle("hello").await.unwrap();

        assert_eq!(answer, "Hi, how can I help?");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(gateway.completion_calls.load(Ordering::SeqCst), 0);
        assert_eq!(*gateway.offered_tools.lock().unwrap(), vec!["get_user_commits"]);
    }

    #[tokio::test]
    async fn test_unknown_tool_fails_without_completion() {
        let gateway = Arc::new(MockGateway::calling(
            ToolCall::new("delete_repo", "{}"),
            "unreachable",
        ));
        let use_case = ChatBotUseCase::new(
            gateway.clone(),
            commits_registry(StubTool::new("get_user_commits", three_commits())),
        );

        let err = use_case.handle("delete everything").await.unwrap_err();

        assert_eq!(err.to_string(), "unknown tool: delete_repo");
        assert!(matches!(err, ChatError::UnknownTool(_)));
        assert_eq!(gateway.completion_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_tool_error_is_forwarded_to_completion() {
        let tool = StubTool::failing(
            "get_user_commits",
            CollaboratorError::timeout(Collaborator::SourceControl).into(),
        );
        let gateway = Arc::new(MockGateway::calling(
            ToolCall::new("get_user_commits", "{}"),
            "GitHub is not responding right now.",
        ));
        let use_case = ChatBotUseCase::new(gateway.clone(), commits_registry(tool));

        let answer = use_case.handle("show my commits").await.unwrap();

        assert_eq!(answer, "GitHub is not responding right now.");
        let result = gateway.last_result.lock().unwrap().clone().unwrap();
        assert_eq!(result.error(), Some("timeout"));
    }

    #[tokio::test]
    async fn test_partial_activity_reaches_completion_with_error() {
        let aggregator = MemberActivityTool::new(
            vec![
                ActivityStep::new(
                    Arc::new(StubTool::new(
                        "get_user_issues",
                        ToolOutput::Issues(vec![issue("ENG-1")]),
                    )),
                    ActivityField::Issues,
                ),
                ActivityStep::new(
                    Arc::new(StubTool::failing(
                        "get_user_commits",
                        CollaboratorError::timeout(Collaborator::SourceControl).into(),
                    )),
                    ActivityField::Commits,
                ),
            ],
            Arc::new(IdentityResolver::new("shubham")),
        );
        let gateway = Arc::new(MockGateway::calling(
            ToolCall::new(MemberActivityTool::NAME, r#"{"username":"bob"}"#),
            "Bob has one open issue; commits are unavailable.",
        ));
        let use_case = ChatBotUseCase::new(
            gateway.clone(),
            ToolRegistry::builder().register(aggregator).build(),
        );

        let answer = use_case.handle("what is bob doing?").await.unwrap();

        assert_eq!(answer, "Bob has one open issue; commits are unavailable.");
        assert_eq!(gateway.completion_calls.load(Ordering::SeqCst), 1);
        let result = gateway.last_result.lock().unwrap().clone().unwrap();
        match result {
            ToolResult::Partial {
                result: ToolOutput::MemberActivity(activity),
                error,
            } => {
                assert_eq!(activity.name, "bob");
                assert_eq!(activity.issues, vec![issue("ENG-1")]);
                assert!(activity.commits.is_empty());
                assert_eq!(error, "get_user_commits failed: timeout");
            }
            other => panic!("expected a partial result, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_arguments_end_the_turn() {
        let tool = StubTool::failing(
            "get_user_commits",
            ToolError::invalid_arguments("get_user_commits", "expected value at line 1"),
        );
        let gateway = Arc::new(MockGateway::calling(
            ToolCall::new("get_user_commits", "{oops"),
            "unreachable",
        ));
        let use_case = ChatBotUseCase::new(gateway.clone(), commits_registry(tool));

        let err = use_case.handle("show my commits").await.unwrap_err();

        assert!(matches!(err, ChatError::InvalidArguments(_)));
        assert_eq!(gateway.completion_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_completion_failure_returns_fallback() {
        let logger = Arc::new(RecordingLogger(Mutex::new(Vec::new())));
        let gateway = Arc::new(MockGateway::calling_then_failing(ToolCall::new(
            "get_user_commits",
            "{}",
        )));
        let use_case = ChatBotUseCase::new(
            gateway,
            commits_registry(StubTool::new("get_user_commits", three_commits())),
        )
        .with_config(ChatBotConfig::default().with_fallback_message("Please try again."))
        .with_conversation_logger(logger.clone());

        let answer = use_case.handle("show my commits").await.unwrap();

        assert_eq!(answer, "Please try again.");
        assert_eq!(
            *logger.0.lock().unwrap(),
            vec!["user_message", "tool_call", "tool_result", "fallback"]
        );
    }
}

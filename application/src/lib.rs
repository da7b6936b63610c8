//! Application layer for team-monitor
//!
//! This crate contains the ports, the tools, the tool registry and the use
//! cases that drive a chat turn. It depends only on the domain layer.

pub mod config;
pub mod identity;
pub mod ports;
pub mod tools;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::{AggregationMode, ChatBotConfig};
pub use identity::IdentityResolver;
pub use ports::{
    ai_gateway::{AiGateway, GatewayError},
    cache::{CacheError, CachePort, NoCache},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    issue_tracker::IssueTrackerPort,
    source_control::SourceControlPort,
    tool::{Tool, ToolContext},
    tool_schema::ToolSchemaPort,
};
pub use tools::{
    ActivityField, ActivityStep, GetIssueStatusTool, GetIssueUpdatesTool, GetUserCommitsTool,
    GetUserContributedReposTool, GetUserIssuesTool, GetUserPrsTool, MemberActivityTool,
    MissingSubTool, ToolRegistry, ToolRegistryBuilder,
};
pub use use_cases::activity_report::{
    ActivityReport, ActivityReportError, ActivityReportInput, ActivityReportUseCase,
};
pub use use_cases::chat_bot::{ChatBotUseCase, ChatError};

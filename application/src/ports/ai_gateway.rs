//! AI gateway port
//!
//! Defines the interface for the decision/completion model.

use async_trait::async_trait;
use monitor_domain::{AiResponse, MemberActivity, Message, ToolCall, ToolDefinition, ToolResult};
use thiserror::Error;

/// Errors that can occur during AI gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway to the model that drives a chat turn
///
/// This port defines how the application layer talks to the LLM provider.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Ask the model to either answer or pick one of `tools`.
    async fn chat(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<AiResponse, GatewayError>;

    /// Narrate the result of the tool the model asked for.
    async fn complete_tool(
        &self,
        call: &ToolCall,
        result: &ToolResult,
    ) -> Result<String, GatewayError>;

    /// Write a short summary of a member's activity.
    async fn summarize_activity(&self, activity: &MemberActivity) -> Result<String, GatewayError>;
}

//! Decision returned by the model for one turn.

use crate::tool::entities::ToolCall;

/// The model either answers directly or asks for exactly one tool.
///
/// Providers that return several tool calls are reduced to the first one by
/// the gateway adapter; a response carrying neither text nor a call is an
/// adapter error, so both cases are unrepresentable here.
///
/// # Examples
///
/// ```
/// use monitor_domain::{AiResponse, ToolCall};
///
/// let answer = AiResponse::Content("Hi, how can I help?".to_string());
/// assert_eq!(answer.as_content(), Some("Hi, how can I help?"));
///
/// let call = AiResponse::ToolCall(ToolCall::new("get_user_prs", "{}"));
/// assert!(call.as_tool_call().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiResponse {
    Content(String),
    ToolCall(ToolCall),
}

impl AiResponse {
    pub fn as_content(&self) -> Option<&str> {
        match self {
            AiResponse::Content(text) => Some(text),
            AiResponse::ToolCall(_) => None,
        }
    }

    pub fn as_tool_call(&self) -> Option<&ToolCall> {
        match self {
            AiResponse::ToolCall(call) => Some(call),
            AiResponse::Content(_) => None,
        }
    }
}

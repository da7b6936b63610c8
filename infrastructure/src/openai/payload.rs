//! OpenAI chat completions request/response types.

use monitor_domain::{AiResponse, Message, Role, ToolCall};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<MessagePayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolPayload>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<&'a str>,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct MessagePayload {
    pub role: &'static str,
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCallPayload>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl MessagePayload {
    pub fn from_message(message: &Message) -> Self {
        Self {
            role: role_name(message.role),
            content: Some(message.content.clone()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// Assistant turn that requested `call`.
    pub fn assistant_tool_call(call: &ToolCall) -> Self {
        Self {
            role: "assistant",
            content: None,
            tool_calls: Some(vec![ToolCallPayload {
                id: call.id.clone(),
                r#type: "function".to_string(),
                function: FunctionCallPayload {
                    name: call.name.clone(),
                    arguments: call.arguments.clone(),
                },
            }]),
            tool_call_id: None,
        }
    }

    /// Result of `call`, as JSON text.
    pub fn tool_result(call: &ToolCall, content: String) -> Self {
        Self {
            role: "tool",
            content: Some(content),
            tool_calls: None,
            tool_call_id: Some(call.id.clone()),
        }
    }
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::Tool => "tool",
    }
}

/// `{"type": "function", "function": {name, description, parameters}}`
#[derive(Debug, Serialize)]
pub(crate) struct ToolPayload {
    pub r#type: &'static str,
    pub function: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ToolCallPayload {
    pub id: String,
    #[serde(default = "function_type")]
    pub r#type: String,
    pub function: FunctionCallPayload,
}

fn function_type() -> String {
    "function".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct FunctionCallPayload {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMessage {
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Vec<ToolCallPayload>,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    pub message: String,
}

impl ChatResponse {
    /// Decision carried by the first choice. The first tool call wins.
    pub fn into_decision(self) -> Option<AiResponse> {
        let message = self.choices.into_iter().next()?.message;
        match message.tool_calls.into_iter().next() {
            Some(tc) => Some(AiResponse::ToolCall(
                ToolCall::new(tc.function.name, tc.function.arguments).with_id(tc.id),
            )),
            None => Some(AiResponse::Content(message.content.unwrap_or_default())),
        }
    }

    /// Text of the first choice.
    pub fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
    }
}

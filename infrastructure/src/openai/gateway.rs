//! OpenAI gateway implementing [`AiGateway`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use monitor_application::{AiGateway, GatewayError, ToolSchemaPort};
use monitor_domain::{AiResponse, MemberActivity, Message, ToolCall, ToolDefinition, ToolResult};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, Secret};
use tracing::{debug, info};

use super::payload::{
    ChatRequest, ChatResponse, ErrorResponse, MessagePayload, ToolPayload,
};
use crate::http::USER_AGENT;
use crate::tools::JsonSchemaToolConverter;

/// Configuration for [`OpenAiGateway`].
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            max_tokens: 1024,
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct OpenAiGateway {
    config: OpenAiConfig,
    http: reqwest::Client,
    schema: Arc<dyn ToolSchemaPort>,
}

impl OpenAiGateway {
    pub fn new(config: OpenAiConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;
        info!(model = %config.model, "OpenAI gateway ready");
        Ok(Self {
            config,
            http,
            schema: Arc::new(JsonSchemaToolConverter),
        })
    }

    pub fn with_schema(mut self, schema: Arc<dyn ToolSchemaPort>) -> Self {
        self.schema = schema;
        self
    }

    fn tool_payloads(&self, tools: &[ToolDefinition]) -> Option<Vec<ToolPayload>> {
        if tools.is_empty() {
            return None;
        }
        Some(
            self.schema
                .all_tools_schema(tools)
                .into_iter()
                .map(|function| ToolPayload {
                    r#type: "function",
                    function,
                })
                .collect(),
        )
    }

    async fn send(&self, request: &ChatRequest<'_>) -> Result<ChatResponse, GatewayError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        debug!(
            model = request.model,
            messages = request.messages.len(),
            tools = request.tools.as_ref().map_or(0, Vec::len),
            "Chat completion request"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }

    async fn complete(&self, messages: Vec<MessagePayload>) -> Result<String, GatewayError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            tools: None,
            tool_choice: None,
            max_tokens: self.config.max_tokens,
        };
        self.send(&request)
            .await?
            .into_content()
            .ok_or_else(|| GatewayError::InvalidResponse("no content in response".to_string()))
    }
}

fn map_reqwest_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

/// Map a non-2xx response onto a gateway error, preferring the API's own
/// error message over the raw body.
fn map_status(status: StatusCode, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| format!("{status}: {body}"));
    match status.as_u16() {
        401 | 403 => GatewayError::AuthenticationFailed(message),
        429 => GatewayError::RateLimited(message),
        500..=599 => GatewayError::Unavailable(message),
        _ => GatewayError::RequestFailed(message),
    }
}

fn summary_prompt(activity: &MemberActivity) -> String {
    let issues = serde_json::to_string(&activity.issues).unwrap_or_default();
    let commits = serde_json::to_string(&activity.commits).unwrap_or_default();
    format!(
        "Summarize the following engineering activity for member {}.\n\nJira issues: {issues}\n\nGitHub commits: {commits}\n",
        activity.name
    )
}

#[async_trait]
impl AiGateway for OpenAiGateway {
    async fn chat(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<AiResponse, GatewayError> {
        let tools = self.tool_payloads(tools);
        let request = ChatRequest {
            model: &self.config.model,
            messages: messages.iter().map(MessagePayload::from_message).collect(),
            tool_choice: tools.as_ref().map(|_| "auto"),
            tools,
            max_tokens: self.config.max_tokens,
        };

        self.send(&request)
            .await?
            .into_decision()
            .ok_or_else(|| GatewayError::InvalidResponse("no choices".to_string()))
    }

    async fn complete_tool(
        &self,
        call: &ToolCall,
        result: &ToolResult,
    ) -> Result<String, GatewayError> {
        let content = result.to_json().to_string();
        self.complete(vec![
            MessagePayload::assistant_tool_call(call),
            MessagePayload::tool_result(call, content),
        ])
        .await
    }

    async fn summarize_activity(&self, activity: &MemberActivity) -> Result<String, GatewayError> {
        self.complete(vec![MessagePayload::from_message(&Message::user(
            summary_prompt(activity),
        ))])
        .await
    }
}

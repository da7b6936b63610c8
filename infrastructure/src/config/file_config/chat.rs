//! Chat turn configuration from TOML (`[chat]` and `[aggregation]` sections)

use std::time::Duration;

use monitor_application::{AggregationMode, ChatBotConfig};
use monitor_application::config::{DEFAULT_FALLBACK_MESSAGE, DEFAULT_SYSTEM_PROMPT};
use serde::{Deserialize, Serialize};

/// `[chat]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    pub system_prompt: String,
    /// Answer returned when the completion request fails.
    pub fallback_message: String,
    /// Per-turn budget for tool execution. 0 is rejected by validation.
    pub turn_timeout_seconds: u64,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            turn_timeout_seconds: 60,
        }
    }
}

impl FileChatConfig {
    pub fn to_chat_bot_config(&self) -> ChatBotConfig {
        ChatBotConfig::default()
            .with_system_prompt(&self.system_prompt)
            .with_fallback_message(&self.fallback_message)
            .with_turn_timeout(Some(Duration::from_secs(self.turn_timeout_seconds)))
    }
}

/// `[aggregation]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAggregationConfig {
    pub mode: AggregationMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_config_converts() {
        let file = FileChatConfig {
            fallback_message: "Try later.".to_string(),
            turn_timeout_seconds: 5,
            ..Default::default()
        };
        let config = file.to_chat_bot_config();
        assert_eq!(config.fallback_message, "Try later.");
        assert_eq!(config.turn_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }
}

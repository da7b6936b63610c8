//! Chat turn parameters.

use std::time::Duration;

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are an assistant that calls backend tools when needed.";
pub const DEFAULT_FALLBACK_MESSAGE: &str = "Sorry! I am unable to process your request.";

/// Parameters of a single chat turn
#[derive(Debug, Clone, PartialEq)]
pub struct ChatBotConfig {
    /// System directive sent first on every turn.
    pub system_prompt: String,
    /// Answer returned when the completion request fails.
    pub fallback_message: String,
    /// Deadline for tool execution within a turn.
    pub turn_timeout: Option<Duration>,
}

impl Default for ChatBotConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            turn_timeout: Some(Duration::from_secs(60)),
        }
    }
}

impl ChatBotConfig {
    // ==================== Builder Methods ====================

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_fallback_message(mut self, message: impl Into<String>) -> Self {
        self.fallback_message = message.into();
        self
    }

    pub fn with_turn_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.turn_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChatBotConfig::default();
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(config.turn_timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_builder() {
        let config = ChatBotConfig::default()
            .with_fallback_message("Try again later.")
            .with_turn_timeout(None);
        assert_eq!(config.fallback_message, "Try again later.");
        assert!(config.turn_timeout.is_none());
    }
}

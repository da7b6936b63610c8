//! Infrastructure layer for team-monitor
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod cache;
pub mod config;
pub mod github;
pub mod jira;
pub mod logging;
pub mod openai;
pub mod tools;

mod http;

// Re-export commonly used types
pub use cache::{InMemoryCache, RedisCache};
pub use config::{CacheBackend, ConfigLoader, ConfigValidationError, FileConfig};
pub use github::{GitHubClient, GitHubConfig};
pub use jira::{JiraClient, JiraConfig};
pub use logging::JsonlConversationLogger;
pub use openai::{OpenAiConfig, OpenAiGateway};
pub use tools::JsonSchemaToolConverter;

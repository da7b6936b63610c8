//! Application-level configuration.
//!
//! - [`ChatBotConfig`] - directive, fallback answer and turn timeout
//! - [`AggregationMode`] - how the member activity tool runs its sub-tools

pub mod aggregation;
pub mod chat;

pub use aggregation::AggregationMode;
pub use chat::{ChatBotConfig, DEFAULT_FALLBACK_MESSAGE, DEFAULT_SYSTEM_PROMPT};

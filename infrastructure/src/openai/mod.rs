//! OpenAI adapter
//!
//! [`OpenAiGateway`] implements the AI gateway port over the chat
//! completions API with function calling.

mod gateway;
mod payload;

pub use gateway::{OpenAiConfig, OpenAiGateway};

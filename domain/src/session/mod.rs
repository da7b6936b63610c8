//! Conversation domain.
//!
//! - [`entities::Message`] - a single message within a turn
//! - [`response::AiResponse`] - the model's decision for a turn

pub mod entities;
pub mod response;

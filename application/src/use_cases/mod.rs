//! Use cases (application services)
//!
//! - [`chat_bot`] - one question, at most one tool, one answer
//! - [`activity_report`] - member activity aggregation on demand

pub mod activity_report;
pub mod chat_bot;

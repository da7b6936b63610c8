//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod ai_gateway;
pub mod cache;
pub mod conversation_logger;
pub mod issue_tracker;
pub mod source_control;
pub mod tool;
pub mod tool_schema;

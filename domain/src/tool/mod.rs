//! Tool domain module
//!
//! Pure definitions for the tool system. The model is shown a list of
//! [`ToolDefinition`]s, commits to at most one [`ToolCall`] per turn, and the
//! chosen tool answers with a [`ToolOutput`] or a [`ToolError`].
//!
//! ```text
//! ┌────────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolDefinition │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (schema)       │    │ (raw args)   │    │ (to the LLM) │
//! └────────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! The executable `Tool` trait lives in the application layer, next to the
//! ports the tools call.

pub mod entities;
pub mod error;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolParameter};
pub use error::{
    AggregateError, Collaborator, CollaboratorError, CollaboratorErrorKind, SubToolFailure,
    ToolError,
};
pub use value_objects::{ToolOutput, ToolResult};

//! Domain layer for team-monitor
//!
//! This crate contains the entities and value objects the assistant works
//! with: source-control and issue-tracker records, the member activity
//! aggregate, and the tool contract types shared by every tool.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tools
//!
//! A tool is a named, schema-described capability. The model sees a
//! [`ToolDefinition`], answers with a [`ToolCall`], and the tool produces a
//! typed [`ToolOutput`] or a [`ToolError`].
//!
//! ## Member Activity
//!
//! [`MemberActivity`] is the aggregate built by running several lookups for
//! one person concurrently and merging the results field by field.

pub mod activity;
pub mod identity;
pub mod issue_tracker;
pub mod session;
pub mod source_control;
pub mod tool;

// Re-export commonly used types
pub use activity::{ActivityPart, MemberActivity};
pub use identity::UserIdentity;
pub use issue_tracker::{ChangelogEntry, Issue, IssueQuery, IssueStatus, IssueUpdate};
pub use session::{
    entities::{Message, Role},
    response::AiResponse,
};
pub use source_control::{
    ActivityType, Commit, CommitWindow, PullRequest, PullRequestFilter, RepoContribution,
    UserEvent,
};
pub use tool::{
    AggregateError, Collaborator, CollaboratorError, CollaboratorErrorKind, SubToolFailure,
    ToolCall, ToolDefinition, ToolError, ToolOutput, ToolParameter, ToolResult,
};

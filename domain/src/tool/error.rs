//! Tool error taxonomy
//!
//! | Variant | Raised by | Effect on a chat turn |
//! |---------|-----------|-----------------------|
//! | `InvalidArguments` | argument decoding | turn fails |
//! | `Collaborator` | a port call (GitHub, Jira, cache) | forwarded to the model |
//! | `Aggregate` | the member activity aggregator | forwarded with partial data |
//! | `Cancelled` / `DeadlineExceeded` | the request context | forwarded to the model |

use crate::activity::MemberActivity;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// External system a failure originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collaborator {
    SourceControl,
    IssueTracker,
    Cache,
    Identity,
}

impl Collaborator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collaborator::SourceControl => "source_control",
            Collaborator::IssueTracker => "issue_tracker",
            Collaborator::Cache => "cache",
            Collaborator::Identity => "identity",
        }
    }
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad classification of a collaborator failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollaboratorErrorKind {
    Timeout,
    Connection,
    /// Non-success HTTP status
    Status(u16),
    /// Response body could not be decoded
    Decode,
    /// The request could not be formed from the given input
    InvalidInput,
    Other,
}

/// A source-tagged failure from an external port.
///
/// Display is the message alone, so an aggregated failure reads
/// `get_user_commits failed: timeout` rather than repeating the tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CollaboratorError {
    pub collaborator: Collaborator,
    pub kind: CollaboratorErrorKind,
    pub message: String,
}

impl CollaboratorError {
    pub fn new(
        collaborator: Collaborator,
        kind: CollaboratorErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            collaborator,
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(collaborator: Collaborator) -> Self {
        Self::new(collaborator, CollaboratorErrorKind::Timeout, "timeout")
    }

    pub fn connection(collaborator: Collaborator, message: impl Into<String>) -> Self {
        Self::new(collaborator, CollaboratorErrorKind::Connection, message)
    }

    pub fn status(collaborator: Collaborator, status: u16, body: impl AsRef<str>) -> Self {
        Self::new(
            collaborator,
            CollaboratorErrorKind::Status(status),
            format!("{} returned status {}: {}", collaborator, status, body.as_ref()),
        )
    }

    pub fn decode(collaborator: Collaborator, message: impl Into<String>) -> Self {
        Self::new(collaborator, CollaboratorErrorKind::Decode, message)
    }

    pub fn invalid_input(collaborator: Collaborator, message: impl Into<String>) -> Self {
        Self::new(collaborator, CollaboratorErrorKind::InvalidInput, message)
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == CollaboratorErrorKind::Timeout
    }
}

/// Error returned by a tool's `execute`
#[derive(Debug, Clone, Error)]
pub enum ToolError {
    /// The raw argument payload did not match the tool's argument shape
    #[error("invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    /// A sub-tool answered with a different result kind than its step expects
    #[error("{tool} returned {actual} output, expected {expected}")]
    UnexpectedOutput {
        tool: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// One or more aggregator sub-tools failed; carries the partial result
    #[error(transparent)]
    Aggregate(Box<AggregateError>),

    #[error("{0}")]
    Internal(String),
}

impl ToolError {
    pub fn invalid_arguments(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Errors that end a chat turn instead of being narrated by the model.
    pub fn is_turn_fatal(&self) -> bool {
        matches!(self, ToolError::InvalidArguments { .. })
    }

    /// The partially populated aggregate, if this is an aggregation failure.
    pub fn partial(&self) -> Option<&MemberActivity> {
        match self {
            ToolError::Aggregate(agg) => Some(agg.partial()),
            _ => None,
        }
    }
}

impl From<AggregateError> for ToolError {
    fn from(err: AggregateError) -> Self {
        ToolError::Aggregate(Box::new(err))
    }
}

/// Failure of a single aggregator sub-tool
#[derive(Debug, Clone, Error)]
#[error("{tool} failed: {error}")]
pub struct SubToolFailure {
    pub tool: String,
    pub error: ToolError,
}

impl SubToolFailure {
    pub fn new(tool: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool: tool.into(),
            error,
        }
    }
}

/// Outcome of an aggregation in which at least one sub-tool failed.
///
/// Failures are kept in completion order; Display shows the first.
#[derive(Debug, Clone)]
pub struct AggregateError {
    partial: MemberActivity,
    failures: Vec<SubToolFailure>,
}

impl AggregateError {
    pub fn new(partial: MemberActivity, failures: Vec<SubToolFailure>) -> Self {
        Self { partial, failures }
    }

    pub fn partial(&self) -> &MemberActivity {
        &self.partial
    }

    pub fn into_partial(self) -> MemberActivity {
        self.partial
    }

    pub fn failures(&self) -> &[SubToolFailure] {
        &self.failures
    }

    pub fn first(&self) -> Option<&SubToolFailure> {
        self.failures.first()
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first() {
            Some(first) => write!(f, "{}", first),
            None => f.write_str("aggregation failed"),
        }
    }
}

impl std::error::Error for AggregateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.first().map(|f| f as &(dyn std::error::Error + 'static))
    }
}

//! Tool port
//!
//! Every tool offered to the model implements [`Tool`]. Tools are invoked
//! with a [`ToolContext`] that carries the turn's cancellation token and
//! optional deadline; collaborator calls made inside `execute` should go
//! through [`ToolContext::guard`] so they are dropped when the turn is
//! cancelled or runs out of time.

use async_trait::async_trait;
use monitor_domain::{ToolDefinition, ToolError, ToolOutput};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// A named, schema-described capability the model can invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Stable unique name used for registry lookup.
    fn name(&self) -> &str;

    /// Schema shown to the model. Must not have side effects.
    fn definition(&self) -> ToolDefinition;

    /// Decode `arguments` (raw JSON text), call the collaborator and return
    /// a typed result.
    async fn execute(&self, ctx: &ToolContext, arguments: &str) -> Result<ToolOutput, ToolError>;
}

/// Cancellation and deadline for one request.
#[derive(Debug, Clone)]
pub struct ToolContext {
    cancellation: CancellationToken,
    deadline: Option<Instant>,
}

impl Default for ToolContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolContext {
    pub fn new() -> Self {
        Self {
            cancellation: CancellationToken::new(),
            deadline: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Context for a sub-unit: cancelled together with this one, same deadline.
    pub fn child(&self) -> Self {
        Self {
            cancellation: self.cancellation.child_token(),
            deadline: self.deadline,
        }
    }

    /// Run `fut` until it finishes, the token is cancelled or the deadline
    /// passes. The future is dropped in the latter two cases.
    pub async fn guard<T, F>(&self, fut: F) -> Result<T, ToolError>
    where
        F: Future<Output = Result<T, ToolError>>,
    {
        let guarded = async {
            tokio::select! {
                biased;
                _ = self.cancellation.cancelled() => Err(ToolError::Cancelled),
                result = fut => result,
            }
        };

        match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, guarded)
                .await
                .unwrap_or(Err(ToolError::DeadlineExceeded)),
            None => guarded.await,
        }
    }
}

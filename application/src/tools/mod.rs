//! Tools offered to the model, and the registry that catalogs them.

pub mod args;
pub mod issue_tracker;
pub mod member_activity;
pub mod registry;
pub mod source_control;

pub use issue_tracker::{GetIssueStatusTool, GetIssueUpdatesTool, GetUserIssuesTool};
pub use member_activity::{ActivityField, ActivityStep, MemberActivityTool, MissingSubTool};
pub use registry::{ToolRegistry, ToolRegistryBuilder};
pub use source_control::{GetUserCommitsTool, GetUserContributedReposTool, GetUserPrsTool};

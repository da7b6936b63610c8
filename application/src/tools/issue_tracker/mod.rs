//! Issue-tracker lookups.

pub mod issue_status;
pub mod issue_updates;
pub mod user_issues;

pub use issue_status::GetIssueStatusTool;
pub use issue_updates::GetIssueUpdatesTool;
pub use user_issues::GetUserIssuesTool;

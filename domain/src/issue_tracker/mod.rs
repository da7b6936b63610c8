//! Issue-tracker domain (Jira).

pub mod entities;

pub use entities::{ChangelogEntry, Issue, IssueQuery, IssueStatus, IssueUpdate};

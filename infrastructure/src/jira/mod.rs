//! Jira adapter
//!
//! [`JiraClient`] implements the issue-tracker port against the Jira Cloud
//! REST API v3. Responses are cached for five minutes by default under
//! `jira_issues:{jql}`, `jira_status:{key}` and `jira_updates:{key}`.

mod client;
mod jql;
mod wire;

pub use client::{JiraClient, JiraConfig};
pub use jql::build_jql;

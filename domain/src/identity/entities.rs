//! Identity entities

use serde::{Deserialize, Serialize};

/// How one person is known to each backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub display_name: String,
    pub jira_account_id: String,
    pub github_handle: String,
}

impl UserIdentity {
    pub fn new(
        display_name: impl Into<String>,
        jira_account_id: impl Into<String>,
        github_handle: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            jira_account_id: jira_account_id.into(),
            github_handle: github_handle.into(),
        }
    }

    /// Identity for a name with no directory entry: the name is used as-is
    /// on every backend.
    pub fn unmapped(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            jira_account_id: name.clone(),
            github_handle: name,
        }
    }
}

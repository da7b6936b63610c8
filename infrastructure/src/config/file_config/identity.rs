//! Identity directory from TOML (`[identity]` section)
//!
//! ```toml
//! [identity]
//! default_user = "shubham"
//!
//! [[identity.users]]
//! name = "shubham"
//! display_name = "Shubham"
//! jira_account_id = "ShubhamK"
//! github_handle = "shubhamk922"
//! ```

use monitor_application::IdentityResolver;
use monitor_domain::UserIdentity;
use serde::{Deserialize, Serialize};

/// One `[[identity.users]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileIdentityEntry {
    /// Name users type when they ask about this person.
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub jira_account_id: String,
    pub github_handle: String,
}

impl FileIdentityEntry {
    fn to_identity(&self) -> UserIdentity {
        UserIdentity::new(
            self.display_name.as_deref().unwrap_or(&self.name),
            &self.jira_account_id,
            &self.github_handle,
        )
    }
}

/// `[identity]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileIdentityConfig {
    /// Person assumed when a question names nobody.
    pub default_user: String,
    pub users: Vec<FileIdentityEntry>,
}

impl Default for FileIdentityConfig {
    fn default() -> Self {
        Self {
            default_user: "shubham".to_string(),
            users: vec![FileIdentityEntry {
                name: "shubham".to_string(),
                display_name: Some("Shubham".to_string()),
                jira_account_id: "ShubhamK".to_string(),
                github_handle: "shubhamk922".to_string(),
            }],
        }
    }
}

impl FileIdentityConfig {
    pub fn to_resolver(&self) -> IdentityResolver {
        self.users
            .iter()
            .fold(IdentityResolver::new(&self.default_user), |resolver, entry| {
                resolver.with_identity(&entry.name, entry.to_identity())
            })
    }

    /// First name that appears twice, compared case-insensitively.
    pub fn duplicate_name(&self) -> Option<&str> {
        let mut seen = std::collections::HashSet::new();
        self.users
            .iter()
            .find(|entry| !seen.insert(entry.name.trim().to_lowercase()))
            .map(|entry| entry.name.as_str())
    }
}

//! Identity resolution
//!
//! One policy for turning the name a user typed (or nothing) into the
//! account each backend knows that person by. The resolver is built by the
//! composition root and shared by every tool.

use monitor_domain::UserIdentity;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct IdentityResolver {
    default_user: String,
    directory: HashMap<String, UserIdentity>,
}

impl IdentityResolver {
    pub fn new(default_user: impl Into<String>) -> Self {
        Self {
            default_user: default_user.into(),
            directory: HashMap::new(),
        }
    }

    /// Add a directory entry. Names are matched case-insensitively.
    pub fn with_identity(mut self, name: &str, identity: UserIdentity) -> Self {
        self.directory.insert(name.trim().to_lowercase(), identity);
        self
    }

    pub fn default_user(&self) -> &str {
        &self.default_user
    }

    /// The requested name, or the default user when none was given.
    pub fn name_or_default<'a>(&'a self, name: Option<&'a str>) -> &'a str {
        match name.map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => &self.default_user,
        }
    }

    /// Identity for `name` after applying the default. Unknown names map to
    /// themselves on every backend.
    pub fn resolve(&self, name: Option<&str>) -> UserIdentity {
        let name = self.name_or_default(name);
        self.directory
            .get(&name.to_lowercase())
            .cloned()
            .unwrap_or_else(|| UserIdentity::unmapped(name))
    }

    pub fn github_handle(&self, name: Option<&str>) -> String {
        self.resolve(name).github_handle
    }

    pub fn jira_account(&self, name: Option<&str>) -> String {
        self.resolve(name).jira_account_id
    }

    pub fn len(&self) -> usize {
        self.directory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directory.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> IdentityResolver {
        IdentityResolver::new("shubham").with_identity(
            "shubham",
            UserIdentity::new("Shubham", "ShubhamK", "shubhamk922"),
        )
    }

    #[test]
    fn test_missing_name_uses_default_user() {
        let r = resolver();
        assert_eq!(r.name_or_default(None), "shubham");
        assert_eq!(r.name_or_default(Some("  ")), "shubham");
        assert_eq!(r.github_handle(None), "shubhamk922");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let r = resolver();
        assert_eq!(r.jira_account(Some("SHUBHAM")), "ShubhamK");
    }

    #[test]
    fn test_unknown_name_maps_to_itself() {
        let r = resolver();
        let identity = r.resolve(Some("alice"));
        assert_eq!(identity.github_handle, "alice");
        assert_eq!(identity.jira_account_id, "alice");
        assert_eq!(identity.display_name, "alice");
    }
}

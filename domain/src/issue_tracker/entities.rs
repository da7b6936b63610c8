//! Issue-tracker entities

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub key: String,
    pub id: String,
    pub summary: String,
    pub status: String,
}

/// Search criteria for issues. Unset fields do not constrain the search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueQuery {
    pub project: Option<String>,
    /// Tracker account id of the assignee
    pub assignee: Option<String>,
    pub status: Option<String>,
    /// Free-text match
    pub text: Option<String>,
}

impl IssueQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueStatus {
    pub key: String,
    pub status: String,
}

/// A single field change from an issue's changelog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    pub author: String,
    pub field: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub created_at: String,
}

/// Recent changelog of an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueUpdate {
    pub issue_key: String,
    pub updates: Vec<ChangelogEntry>,
}

impl IssueUpdate {
    /// Keep only the `limit` most recent entries. Entries are expected
    /// oldest first, as the tracker returns them.
    pub fn truncate_to_recent(mut self, limit: usize) -> Self {
        if self.updates.len() > limit {
            let excess = self.updates.len() - limit;
            self.updates.drain(..excess);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> ChangelogEntry {
        ChangelogEntry {
            author: "Ada".to_string(),
            field: "status".to_string(),
            from: Some(format!("s{n}")),
            to: Some(format!("s{}", n + 1)),
            created_at: format!("2025-01-{:02}T00:00:00.000+0000", n + 1),
        }
    }

    #[test]
    fn test_truncate_keeps_most_recent() {
        let update = IssueUpdate {
            issue_key: "ENG-1".to_string(),
            updates: (0..5).map(entry).collect(),
        };

        let recent = update.truncate_to_recent(2);
        assert_eq!(recent.updates.len(), 2);
        assert_eq!(recent.updates[0].from.as_deref(), Some("s3"));
        assert_eq!(recent.updates[1].from.as_deref(), Some("s4"));
    }

    #[test]
    fn test_truncate_under_limit_is_noop() {
        let update = IssueUpdate {
            issue_key: "ENG-1".to_string(),
            updates: vec![entry(0)],
        };
        assert_eq!(update.clone().truncate_to_recent(10), update);
    }

    #[test]
    fn test_query_builder() {
        let q = IssueQuery::new().with_project("ENG").with_status("In Progress");
        assert_eq!(q.project.as_deref(), Some("ENG"));
        assert!(q.assignee.is_none());
    }
}

//! Member activity entities

use crate::issue_tracker::Issue;
use crate::source_control::Commit;
use serde::{Deserialize, Serialize};

/// Git and Jira activity for one team member (Aggregate)
///
/// Each field is filled by exactly one sub-lookup. An empty side is left out
/// of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberActivity {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commits: Vec<Commit>,
}

impl MemberActivity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            issues: Vec::new(),
            commits: Vec::new(),
        }
    }

    /// Write one sub-result into the field it belongs to.
    pub fn merge(&mut self, part: ActivityPart) {
        match part {
            ActivityPart::Issues(issues) => self.issues = issues,
            ActivityPart::Commits(commits) => self.commits = commits,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty() && self.commits.is_empty()
    }
}

/// A sub-result of the member activity aggregation.
///
/// The variant is decided by the step that launched the lookup, so merging
/// never has to inspect a result to find out where it goes.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityPart {
    Issues(Vec<Issue>),
    Commits(Vec<Commit>),
}

impl ActivityPart {
    pub fn field(&self) -> &'static str {
        match self {
            ActivityPart::Issues(_) => "issues",
            ActivityPart::Commits(_) => "commits",
        }
    }
}

//! Jira REST payloads and their mapping onto domain entities.

use monitor_domain::{ChangelogEntry, Issue, IssueStatus, IssueUpdate};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub issues: Vec<IssueItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueItem {
    pub id: String,
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct IssueFields {
    pub summary: String,
    pub status: Option<StatusField>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusField {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusResponse {
    pub key: String,
    #[serde(default)]
    pub fields: IssueFields,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChangelogResponse {
    pub key: String,
    #[serde(default)]
    pub changelog: Changelog,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Changelog {
    #[serde(default)]
    pub histories: Vec<History>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct History {
    pub created: String,
    pub author: Option<HistoryAuthor>,
    #[serde(default)]
    pub items: Vec<HistoryItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HistoryAuthor {
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryItem {
    pub field: String,
    #[serde(rename = "fromString")]
    pub from: Option<String>,
    #[serde(rename = "toString")]
    pub to: Option<String>,
}

fn status_name(fields: &IssueFields) -> String {
    fields
        .status
        .as_ref()
        .map(|s| s.name.clone())
        .unwrap_or_default()
}

pub(crate) fn map_issues(response: SearchResponse) -> Vec<Issue> {
    response
        .issues
        .into_iter()
        .map(|item| Issue {
            status: status_name(&item.fields),
            key: item.key,
            id: item.id,
            summary: item.fields.summary,
        })
        .collect()
}

pub(crate) fn map_status(response: StatusResponse) -> IssueStatus {
    IssueStatus {
        status: status_name(&response.fields),
        key: response.key,
    }
}

/// Flatten histories into one entry per changed field, oldest first.
pub(crate) fn map_changelog(response: ChangelogResponse) -> IssueUpdate {
    let updates = response
        .changelog
        .histories
        .into_iter()
        .flat_map(|history| {
            let author = history
                .author
                .map(|a| a.display_name)
                .unwrap_or_default();
            let created = history.created;
            history.items.into_iter().map(move |item| ChangelogEntry {
                author: author.clone(),
                field: item.field,
                from: item.from,
                to: item.to,
                created_at: created.clone(),
            })
        })
        .collect();

    IssueUpdate {
        issue_key: response.key,
        updates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_issues() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"issues": [
                {"id": "10001", "key": "ENG-1",
                 "fields": {"summary": "Login fails", "status": {"name": "In Progress"}}},
                {"id": "10002", "key": "ENG-2", "fields": {"summary": "No status"}}
            ]}"#,
        )
        .unwrap();

        let issues = map_issues(response);

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].key, "ENG-1");
        assert_eq!(issues[0].id, "10001");
        assert_eq!(issues[0].status, "In Progress");
        assert_eq!(issues[1].status, "");
    }

    #[test]
    fn test_map_status() {
        let response: StatusResponse = serde_json::from_str(
            r#"{"id": "10001", "key": "ENG-1", "fields": {"status": {"name": "Done"}}}"#,
        )
        .unwrap();
        assert_eq!(
            map_status(response),
            IssueStatus {
                key: "ENG-1".to_string(),
                status: "Done".to_string()
            }
        );
    }

    #[test]
    fn test_map_changelog_flattens_items() {
        let response: ChangelogResponse = serde_json::from_str(
            r#"{"key": "ENG-1", "changelog": {"histories": [
                {"created": "2025-03-01T10:00:00.000+0000",
                 "author": {"displayName": "Ada"},
                 "items": [
                    {"field": "status", "fromString": "To Do", "toString": "In Progress"},
                    {"field": "assignee", "fromString": null, "toString": "Ada"}
                 ]},
                {"created": "2025-03-02T10:00:00.000+0000",
                 "items": [{"field": "status", "fromString": "In Progress", "toString": "Done"}]}
            ]}}"#,
        )
        .unwrap();

        let update = map_changelog(response);

        assert_eq!(update.issue_key, "ENG-1");
        assert_eq!(update.updates.len(), 3);
        assert_eq!(update.updates[0].author, "Ada");
        assert_eq!(update.updates[1].from, None);
        assert_eq!(update.updates[2].author, "");
        assert_eq!(update.updates[2].to.as_deref(), Some("Done"));
    }
}

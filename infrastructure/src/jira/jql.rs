//! JQL construction from an [`IssueQuery`].

use monitor_domain::IssueQuery;

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Account ids and usernames made of these characters need no quoting.
fn is_bare_word(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '@'))
}

/// Build the JQL for `query`. Without an assignee the search is scoped to
/// `currentUser()`, so the result always has at least one clause.
pub fn build_jql(query: &IssueQuery) -> String {
    let mut clauses = Vec::new();

    if let Some(project) = &query.project {
        clauses.push(format!("project = {}", quote(project)));
    }
    match query.assignee.as_deref() {
        Some(assignee) if is_bare_word(assignee) => {
            clauses.push(format!("assignee = {assignee}"))
        }
        Some(assignee) => clauses.push(format!("assignee = {}", quote(assignee))),
        None => clauses.push("assignee = currentUser()".to_string()),
    }
    if let Some(status) = &query.status {
        clauses.push(format!("status = {}", quote(status)));
    }
    if let Some(text) = &query.text {
        clauses.push(format!("text ~ {}", quote(text)));
    }

    clauses.join(" AND ")
}

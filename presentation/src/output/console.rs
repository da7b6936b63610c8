//! Console output formatter for answers and activity reports

use colored::Colorize;
use monitor_application::ActivityReport;
use monitor_domain::{Commit, Issue};

/// Longest commit subject shown in the text report.
const MAX_SUBJECT: usize = 72;

/// Formats chat answers and activity reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a chat answer
    pub fn format_answer(answer: &str) -> String {
        format!("{}\n", answer.trim_end())
    }

    /// Format a turn error
    pub fn format_error(error: &dyn std::fmt::Display) -> String {
        format!("{} {}", "Error:".red().bold(), error)
    }

    /// Format the complete activity report
    pub fn format_report(report: &ActivityReport) -> String {
        let activity = &report.activity;
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Activity: {}", activity.name)));
        output.push('\n');

        output.push_str(&Self::section_header(&format!(
            "Issues ({})",
            activity.issues.len()
        )));
        if activity.issues.is_empty() {
            output.push_str(&format!("  {}\n", "none".dimmed()));
        }
        for issue in &activity.issues {
            output.push_str(&Self::issue_line(issue));
        }

        output.push_str(&Self::section_header(&format!(
            "Commits ({})",
            activity.commits.len()
        )));
        if activity.commits.is_empty() {
            output.push_str(&format!("  {}\n", "none".dimmed()));
        }
        for commit in &activity.commits {
            output.push_str(&Self::commit_line(commit));
        }

        if !report.failures.is_empty() {
            output.push_str(&format!("\n{}\n", "Incomplete:".yellow().bold()));
            for failure in &report.failures {
                output.push_str(&format!("  * {}\n", failure));
            }
        }

        if let Some(summary) = &report.summary {
            output.push_str(&Self::section_header("Summary"));
            output.push_str(&format!("\n{}\n", summary.trim_end()));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_report_json(report: &ActivityReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    fn issue_line(issue: &Issue) -> String {
        format!(
            "  {} {} {}\n",
            issue.key.yellow().bold(),
            format!("[{}]", issue.status).cyan(),
            issue.summary
        )
    }

    fn commit_line(commit: &Commit) -> String {
        let short_sha: String = commit.sha.chars().take(7).collect();
        let subject = commit.message.lines().next().unwrap_or_default();
        format!(
            "  {} {} {}\n",
            short_sha.yellow(),
            format!("{}:", commit.repo).cyan(),
            Self::truncate(subject, MAX_SUBJECT)
        )
    }

    fn truncate(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            return text.to_string();
        }
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{cut}...")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monitor_domain::MemberActivity;

    fn report() -> ActivityReport {
        let mut activity = MemberActivity::new("alice");
        activity.issues.push(Issue {
            key: "ENG-7".to_string(),
            id: "10007".to_string(),
            summary: "Fix login".to_string(),
            status: "In Progress".to_string(),
        });
        activity.commits.push(Commit {
            repo: "acme/api".to_string(),
            sha: "0123456789abcdef".to_string(),
            message: "Add retries\n\nLonger body".to_string(),
            author: "alice".to_string(),
            date: "2024-05-01T10:00:00Z".to_string(),
            url: "https://github.com/acme/api/commit/0123456".to_string(),
        });
        ActivityReport {
            activity,
            failures: Vec::new(),
            summary: None,
        }
    }

    #[test]
    fn test_text_report_lists_issues_and_commits() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_report(&report());

        assert!(output.contains("Activity: alice"));
        assert!(output.contains("ENG-7 [In Progress] Fix login"));
        assert!(output.contains("0123456 acme/api: Add retries"));
        assert!(!output.contains("Longer body"));
        assert!(!output.contains("Incomplete:"));
    }

    #[test]
    fn test_text_report_shows_failures_and_summary() {
        colored::control::set_override(false);
        let mut report = report();
        report.failures.push("get_user_commits: timeout".to_string());
        report.summary = Some("Alice is busy.".to_string());

        let output = ConsoleFormatter::format_report(&report);

        assert!(output.contains("Incomplete:"));
        assert!(output.contains("  * get_user_commits: timeout"));
        assert!(output.contains("Alice is busy."));
    }

    #[test]
    fn test_json_report_omits_empty_sections() {
        let json = ConsoleFormatter::format_report_json(&report());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["activity"]["name"], "alice");
        assert_eq!(value["activity"]["issues"][0]["key"], "ENG-7");
        assert!(value.get("failures").is_none());
        assert!(value.get("summary").is_none());
    }

    #[test]
    fn test_truncate_long_subject() {
        let long = "x".repeat(100);
        let cut = ConsoleFormatter::truncate(&long, 10);
        assert_eq!(cut, "xxxxxxx...");
    }
}

//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for activity reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing
    Text,
    /// Pretty-printed JSON
    Json,
}

/// CLI arguments for team-monitor
#[derive(Parser, Debug)]
#[command(name = "team-monitor")]
#[command(author, version, about = "Chat bot for team activity on GitHub and Jira")]
#[command(long_about = r#"
team-monitor answers questions about your team's work. The model picks one
tool per question (commits, pull requests, contributed repositories, Jira
issues, issue status, issue updates, or a member activity summary), and the
tool's result is narrated back as the answer.

Configuration files are loaded from (in priority order):
1. TEAM_MONITOR_* environment variables (e.g. TEAM_MONITOR_OPENAI__MODEL)
2. --config <path>     Explicit config file
3. ./team-monitor.toml Project-level config
4. ~/.config/team-monitor/config.toml   Global config

Example:
  team-monitor "What did alice commit this week?"
  team-monitor --chat
  team-monitor --activity alice --output json
  team-monitor --activity --summarize
"#)]
pub struct Cli {
    /// The question to ask (not required in chat or activity mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long, conflicts_with = "activity")]
    pub chat: bool,

    /// Print a member's issues and commits without asking the model;
    /// the default user when no name is given
    #[arg(short, long, value_name = "NAME")]
    pub activity: Option<Option<String>>,

    /// Ask the model to summarize the activity report
    #[arg(long, requires = "activity")]
    pub summarize: bool,

    /// Output format for activity reports
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

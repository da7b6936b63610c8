//! Source-control domain (GitHub).

pub mod entities;

pub use entities::{
    ActivityType, Commit, CommitWindow, PullRequest, PullRequestFilter, RepoContribution,
    UserEvent,
};

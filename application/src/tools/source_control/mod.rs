//! Source-control lookups.

pub mod commits;
pub mod contributed_repos;
pub mod pull_requests;

pub use commits::GetUserCommitsTool;
pub use contributed_repos::{GetUserContributedReposTool, contributions_from_events};
pub use pull_requests::GetUserPrsTool;

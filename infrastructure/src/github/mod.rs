//! GitHub adapter
//!
//! [`GitHubClient`] implements the source-control port over the REST API:
//!
//! | Port operation | Endpoint | Cache key |
//! |----------------|----------|-----------|
//! | events | `/users/{h}/events` | `github_events_{h}` |
//! | repositories | `/users/{h}/repos` | `github_repos_{h}` |
//! | commits | `/repos/{o}/{r}/commits?author={h}` | `github_commits_{h}_{r}_{since}_{until}` |
//! | repo pulls | `/repos/{o}/{r}/pulls?state=..` | `github_prs_{o}_{r}_{filter}` |
//! | user pulls | `/search/issues?q=author:{h} type:pr ..` | `github_user_wide_prs_{h}_{filter}` |

mod client;
mod wire;

pub use client::{GitHubClient, GitHubConfig};

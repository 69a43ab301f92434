//! GitHub issue-tracker boundary for the issue bridge.
//!
//! Exposes the `IssueTracker` seam used by listeners plus the REST client that
//! implements it against the GitHub issues API.

pub mod github_api_client;
pub mod github_transport_helpers;
pub mod issue_tracker;

pub use github_api_client::{GithubApiClient, DEFAULT_GITHUB_API_BASE};
pub use issue_tracker::{CreatedIssue, IssueTracker, NewIssue, RepoRef};

//! GitHub REST API access: the profile and repository-list endpoints.

mod client;
mod error;
mod types;

#[cfg(test)]
pub use client::MockGitHubApi;
pub use client::{DEFAULT_API_URL, GitHub, GitHubApi};
pub use error::FetchError;
pub use types::{Profile, Repository, parse_timestamp};

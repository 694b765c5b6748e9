//! Search session: the state behind the dashboard.
//!
//! A session is either idle (optionally carrying an error) or has a loaded
//! dashboard. Searches are fenced with tickets: only the most recently issued
//! ticket may change the session, so a slow older search can't overwrite a
//! newer one.

use futures_util::future::join;
use log::{debug, info, warn};
use serde::Serialize;

use crate::analysis::{self, LanguageTotals};
use crate::github::{FetchError, GitHubApi, Profile, Repository};

/// Message shown when the profile does not exist.
pub const USER_NOT_FOUND: &str = "User not found!";

/// Identifies one submitted search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Raw results of the two fetches of one search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub username: String,
    pub profile: Result<Profile, FetchError>,
    pub repositories: Result<Vec<Repository>, FetchError>,
}

/// The user-visible error of a failed search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchError {
    pub kind: &'static str,
    pub message: String,
}

impl SearchError {
    pub fn from_fetch(err: &FetchError) -> Self {
        let message = match err {
            FetchError::NotFound => USER_NOT_FOUND.to_string(),
            other => format!("Could not load user: {}", other),
        };
        Self {
            kind: err.kind(),
            message,
        }
    }
}

/// View model of a loaded search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub profile: Profile,
    pub repositories: Vec<Repository>,
    pub language_counts: LanguageTotals,
    pub language_sizes: LanguageTotals,
    pub recent: Vec<Repository>,
    /// Set when the repository list could not be fetched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repositories_notice: Option<String>,
}

impl Dashboard {
    pub fn build(
        profile: Profile,
        repositories: Result<Vec<Repository>, FetchError>,
        recent_limit: usize,
    ) -> Self {
        let (repositories, repositories_notice) = match repositories {
            Ok(repos) => (repos, None),
            Err(err) => (
                Vec::new(),
                Some(format!("Repositories unavailable: {}", err)),
            ),
        };

        Self {
            language_counts: analysis::language_counts(&repositories),
            language_sizes: analysis::language_sizes(&repositories),
            recent: analysis::recent_repositories(&repositories, recent_limit),
            profile,
            repositories,
            repositories_notice,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<SearchError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dashboard: Option<Dashboard>,
    #[serde(skip)]
    generation: u64,
    #[serde(skip)]
    recent_limit: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(analysis::RECENT_LIMIT)
    }
}

impl Session {
    pub fn new(recent_limit: usize) -> Self {
        Self {
            error: None,
            dashboard: None,
            generation: 0,
            recent_limit,
        }
    }

    pub fn error(&self) -> Option<&SearchError> {
        self.error.as_ref()
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        self.dashboard.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.dashboard.is_some()
    }

    /// Issues a ticket for a new search; all earlier tickets become stale.
    pub fn begin_search(&mut self) -> SearchTicket {
        self.generation += 1;
        SearchTicket(self.generation)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Applies the outcome of a search. Returns false when the ticket is stale
    /// and the outcome was discarded.
    pub fn complete(&mut self, ticket: SearchTicket, outcome: SearchOutcome) -> bool {
        if !self.is_current(ticket) {
            debug!(
                "Discarding stale result for {:?} (ticket {}, current {})",
                outcome.username, ticket.0, self.generation
            );
            return false;
        }

        match outcome.profile {
            Ok(profile) => {
                if let Err(err) = &outcome.repositories {
                    warn!(
                        "Repositories of {:?} unavailable: {}",
                        outcome.username, err
                    );
                }
                let dashboard = Dashboard::build(profile, outcome.repositories, self.recent_limit);
                info!(
                    "Loaded {:?}: {} repositories, {} languages",
                    outcome.username,
                    dashboard.repositories.len(),
                    dashboard.language_counts.len()
                );
                self.dashboard = Some(dashboard);
                self.error = None;
            }
            Err(err) => {
                info!("Search for {:?} failed: {}", outcome.username, err);
                // A previously loaded dashboard is kept; only the error changes.
                self.error = Some(SearchError::from_fetch(&err));
            }
        }

        true
    }
}

/// Fetches the profile and repository list of `username` concurrently.
#[tracing::instrument(skip(github))]
pub async fn fetch_outcome<G: GitHubApi + ?Sized>(github: &G, username: &str) -> SearchOutcome {
    debug!("Searching for {:?} at {}", username, github.api_url());

    let (profile, repositories) = join(
        github.fetch_profile(username),
        github.fetch_repositories(username),
    )
    .await;

    SearchOutcome {
        username: username.to_string(),
        profile,
        repositories,
    }
}

/// Runs one full search against `session`: ticket, fetch, apply.
pub async fn search<G: GitHubApi + ?Sized>(
    session: &mut Session,
    github: &G,
    username: &str,
) -> bool {
    let ticket = session.begin_search();
    let outcome = fetch_outcome(github, username).await;
    session.complete(ticket, outcome)
}

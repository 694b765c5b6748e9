use async_trait::async_trait;
use log::{debug, warn};

use crate::http::HttpClient;

use super::error::FetchError;
use super::types::{Profile, Repository};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Repositories requested per page.
const PER_PAGE: usize = 100;

/// Limit to 10 pages (1000 repositories) to prevent an endless loop.
const MAX_PAGES: usize = 10;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitHubApi: Send + Sync {
    async fn fetch_profile(&self, username: &str) -> Result<Profile, FetchError>;
    async fn fetch_repositories(&self, username: &str) -> Result<Vec<Repository>, FetchError>;
    fn api_url(&self) -> &str;
}

pub struct GitHub {
    http_client: HttpClient,
    api_url: String,
}

impl GitHub {
    #[tracing::instrument(skip(http_client, api_url))]
    pub fn new(http_client: HttpClient, api_url: Option<String>) -> Self {
        let api_url = api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl GitHubApi for GitHub {
    #[tracing::instrument(skip(self))]
    async fn fetch_profile(&self, username: &str) -> Result<Profile, FetchError> {
        let url = format!("{}/users/{}", self.api_url, username);
        debug!("Fetching profile from {}...", url);

        self.http_client
            .get_json::<Profile>(&url)
            .await
            .map_err(|e| {
                warn!("Error fetching user profile {:?}: {:#}", username, e);
                FetchError::from_http(&e)
            })
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_repositories(&self, username: &str) -> Result<Vec<Repository>, FetchError> {
        let url = format!("{}/users/{}/repos", self.api_url, username);
        let mut repositories = Vec::new();
        let mut page = 1;

        while page <= MAX_PAGES {
            debug!("Fetching repositories page {} from {}...", page, url);

            let per_page = PER_PAGE.to_string();
            let page_number = page.to_string();
            let parsed: Vec<Repository> = self
                .http_client
                .get_json_with_query(
                    &url,
                    &[("per_page", per_page.as_str()), ("page", page_number.as_str())],
                )
                .await
                .map_err(|e| {
                    warn!("Error fetching user repositories {:?}: {:#}", username, e);
                    FetchError::from_http(&e)
                })?;

            let len = parsed.len();
            repositories.extend(parsed);

            if len < PER_PAGE {
                break;
            }

            page += 1;
        }

        debug!("Fetched {} repositories for {:?}", repositories.len(), username);
        Ok(repositories)
    }

    fn api_url(&self) -> &str {
        &self.api_url
    }
}

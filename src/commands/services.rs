//! Service factory for building application dependencies.
//!
//! Services are built from configuration values but are not part of the
//! configuration itself.

use anyhow::Result;
use log::debug;
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue},
};

use crate::{github::GitHub, http::HttpClient};

use super::config::Config;

const USER_AGENT: &str = "ghpa-cli";

/// Build an HTTP client with optional authentication token
pub fn build_http_client(token: Option<&str>, retries: usize) -> Result<HttpClient> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/vnd.github+json"),
    );

    if let Some(token) = token {
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        debug!("HTTP client configured with authentication");
    }

    let client = Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()?;

    Ok(HttpClient::new(client).with_retries(retries))
}

/// Build the GitHub client from configuration
pub fn build_github(config: &Config) -> Result<GitHub> {
    let http_client = build_http_client(config.token.as_deref(), config.retries)?;
    Ok(GitHub::new(http_client, Some(config.api_url.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::GitHubApi;
    use crate::render::RenderOptions;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_build_http_client_with_token() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/")
            .match_header(
                "Authorization",
                Matcher::Exact("Bearer test_token".to_string()),
            )
            .match_header("User-Agent", USER_AGENT)
            .create();

        let http_client = build_http_client(Some("test_token"), 0).unwrap();
        let _ = http_client.inner().get(server.url()).send().await;

        mock.assert();
    }

    #[tokio::test]
    async fn test_build_http_client_without_token() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/")
            .match_header("Authorization", Matcher::Missing)
            .create();

        let http_client = build_http_client(None, 0).unwrap();
        let _ = http_client.inner().get(server.url()).send().await;

        mock.assert();
    }

    #[test]
    fn test_build_http_client_retries() {
        assert_eq!(build_http_client(None, 0).unwrap().retries(), 0);
        assert_eq!(build_http_client(None, 3).unwrap().retries(), 3);
    }

    #[test]
    fn test_build_http_client_rejects_invalid_token() {
        assert!(build_http_client(Some("bad\ntoken"), 0).is_err());
    }

    #[test]
    fn test_build_github_from_config() {
        let config = Config {
            api_url: "http://localhost:1234".to_string(),
            token: None,
            retries: 2,
            recent_limit: 5,
            render: RenderOptions::default(),
        };

        let github = build_github(&config).unwrap();
        assert_eq!(github.api_url(), "http://localhost:1234");
    }
}

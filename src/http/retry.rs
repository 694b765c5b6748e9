//! Status classification for API responses, separating retryable failures
//! from the ones that will not succeed on a second attempt.

use anyhow::Result;
use reqwest::{Response, StatusCode, header::HeaderMap};

/// Delay between retry attempts in milliseconds.
pub const RETRY_DELAY_MS: u64 = 1000;

/// Header GitHub uses to report the remaining request quota.
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// Errors that should not be retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NonRetryableError {
    /// Rate limit exceeded (HTTP 403 with exhausted quota or 429)
    RateLimitExceeded(String),
    /// Authentication failed (HTTP 401)
    AuthenticationFailed(String),
    /// Resource not found (HTTP 404)
    NotFound(String),
    /// Forbidden access (HTTP 403 non-rate-limit)
    Forbidden(String),
    /// Other client errors that won't succeed on retry
    ClientError(u16),
}

impl std::fmt::Display for NonRetryableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NonRetryableError::RateLimitExceeded(msg) => {
                write!(
                    f,
                    "Rate limit exceeded: {}. Try again later or set GITHUB_TOKEN environment variable.",
                    msg
                )
            }
            NonRetryableError::AuthenticationFailed(msg) => {
                write!(
                    f,
                    "Authentication failed: {}. Check your GITHUB_TOKEN.",
                    msg
                )
            }
            NonRetryableError::NotFound(msg) => {
                write!(f, "Not found: {}", msg)
            }
            NonRetryableError::Forbidden(msg) => {
                write!(f, "Access forbidden: {}. You may need authentication.", msg)
            }
            NonRetryableError::ClientError(status) => {
                write!(f, "Request error: HTTP {} error", status)
            }
        }
    }
}

impl std::error::Error for NonRetryableError {}

/// Classifies a response status as retryable or non-retryable.
/// Returns Ok(()) for success and retryable statuses, Err with a user-friendly error if not.
pub fn classify_status(status: StatusCode, headers: &HeaderMap) -> Result<(), NonRetryableError> {
    match status {
        StatusCode::UNAUTHORIZED => Err(NonRetryableError::AuthenticationFailed(
            "Invalid or missing authentication token".to_string(),
        )),
        StatusCode::FORBIDDEN => {
            let exhausted = headers
                .get(RATE_LIMIT_REMAINING)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.trim() == "0");
            if exhausted {
                return Err(NonRetryableError::RateLimitExceeded(
                    "GitHub API rate limit exceeded".to_string(),
                ));
            }
            Err(NonRetryableError::Forbidden(
                "Access to this resource is forbidden".to_string(),
            ))
        }
        StatusCode::TOO_MANY_REQUESTS => Err(NonRetryableError::RateLimitExceeded(
            "Too many requests".to_string(),
        )),
        StatusCode::NOT_FOUND => Err(NonRetryableError::NotFound(
            "The requested resource was not found".to_string(),
        )),
        // Other 4xx client errors are generally not retryable
        s if s.is_client_error() => Err(NonRetryableError::ClientError(s.as_u16())),
        // 5xx server errors are retryable
        _ => Ok(()),
    }
}

/// Turns a non-success response into an error.
/// Non-retryable statuses become [`NonRetryableError`]; anything else stays a `reqwest::Error`.
pub fn check_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    classify_status(response.status(), response.headers())?;
    Ok(response.error_for_status()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    async fn response_with(status: usize, headers: &[(&'static str, &'static str)]) -> Response {
        let mut server = mockito::Server::new_async().await;
        let mut mock = server.mock("GET", "/").with_status(status);
        for (name, value) in headers {
            mock = mock.with_header(*name, *value);
        }
        let _m = mock.create_async().await;

        reqwest::Client::new().get(server.url()).send().await.unwrap()
    }

    #[test]
    fn test_non_retryable_error_display() {
        let err = NonRetryableError::RateLimitExceeded("test".to_string());
        assert!(err.to_string().contains("Rate limit"));
        assert!(err.to_string().contains("GITHUB_TOKEN"));

        let err = NonRetryableError::AuthenticationFailed("test".to_string());
        assert!(err.to_string().contains("Authentication"));

        let err = NonRetryableError::NotFound("test".to_string());
        assert!(err.to_string().contains("Not found"));

        let err = NonRetryableError::Forbidden("test".to_string());
        assert!(err.to_string().contains("forbidden"));

        let err = NonRetryableError::ClientError(400);
        assert!(err.to_string().contains("HTTP 400"));
    }

    #[test]
    fn test_classify_status_success_is_ok() {
        assert!(classify_status(StatusCode::OK, &HeaderMap::new()).is_ok());
    }

    #[test]
    fn test_classify_status_forbidden_with_exhausted_quota() {
        let mut headers = HeaderMap::new();
        headers.insert(RATE_LIMIT_REMAINING, HeaderValue::from_static("0"));

        let result = classify_status(StatusCode::FORBIDDEN, &headers);
        assert!(matches!(
            result,
            Err(NonRetryableError::RateLimitExceeded(_))
        ));
    }

    #[test]
    fn test_classify_status_forbidden_with_quota_left() {
        let mut headers = HeaderMap::new();
        headers.insert(RATE_LIMIT_REMAINING, HeaderValue::from_static("42"));

        let result = classify_status(StatusCode::FORBIDDEN, &headers);
        assert!(matches!(result, Err(NonRetryableError::Forbidden(_))));
    }

    #[test]
    fn test_classify_status_server_error_is_retryable() {
        assert!(classify_status(StatusCode::BAD_GATEWAY, &HeaderMap::new()).is_ok());
    }

    #[tokio::test]
    async fn test_check_status_unauthorized() {
        let response = response_with(401, &[]).await;
        let err = check_status(response).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<NonRetryableError>(),
            Some(NonRetryableError::AuthenticationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_check_status_too_many_requests() {
        let response = response_with(429, &[]).await;
        let err = check_status(response).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<NonRetryableError>(),
            Some(NonRetryableError::RateLimitExceeded(_))
        ));
    }

    #[tokio::test]
    async fn test_check_status_rate_limit_header() {
        let response = response_with(403, &[("x-ratelimit-remaining", "0")]).await;
        let err = check_status(response).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<NonRetryableError>(),
            Some(NonRetryableError::RateLimitExceeded(_))
        ));
    }

    #[tokio::test]
    async fn test_check_status_not_found() {
        let response = response_with(404, &[]).await;
        let err = check_status(response).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<NonRetryableError>(),
            Some(NonRetryableError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_check_status_other_client_error() {
        let response = response_with(422, &[]).await;
        let err = check_status(response).unwrap_err();
        assert_eq!(
            err.downcast_ref::<NonRetryableError>(),
            Some(&NonRetryableError::ClientError(422))
        );
    }

    #[tokio::test]
    async fn test_check_status_server_error_stays_reqwest_error() {
        let response = response_with(503, &[]).await;
        let err = check_status(response).unwrap_err();

        assert!(err.downcast_ref::<NonRetryableError>().is_none());
        let status = err
            .downcast_ref::<reqwest::Error>()
            .and_then(|e| e.status());
        assert_eq!(status, Some(StatusCode::SERVICE_UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_check_status_success_passes_through() {
        let response = response_with(200, &[]).await;
        assert!(check_status(response).is_ok());
    }
}

use crate::http::NonRetryableError;

/// Why a GitHub request failed. Lets callers pick a message per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// HTTP 404
    NotFound,
    /// HTTP 401
    Unauthorized,
    /// HTTP 429, or 403 with an exhausted quota
    RateLimited,
    /// HTTP 403 for other reasons
    Forbidden,
    /// Any other 4xx status
    Client(u16),
    /// 5xx status
    Server(u16),
    /// Connection, TLS, timeout and similar failures
    Transport(String),
    /// Body was not the expected JSON shape
    Decode(String),
}

impl FetchError {
    /// Maps an error from [`crate::http::HttpClient`] to its kind.
    pub fn from_http(err: &anyhow::Error) -> Self {
        if let Some(non_retryable) = err.downcast_ref::<NonRetryableError>() {
            return match non_retryable {
                NonRetryableError::NotFound(_) => FetchError::NotFound,
                NonRetryableError::AuthenticationFailed(_) => FetchError::Unauthorized,
                NonRetryableError::RateLimitExceeded(_) => FetchError::RateLimited,
                NonRetryableError::Forbidden(_) => FetchError::Forbidden,
                NonRetryableError::ClientError(status) => FetchError::Client(*status),
            };
        }

        if let Some(reqwest_err) = err.downcast_ref::<reqwest::Error>() {
            if reqwest_err.is_decode() {
                return FetchError::Decode(format!("{:#}", err));
            }
            if let Some(status) = reqwest_err.status() {
                if status.is_server_error() {
                    return FetchError::Server(status.as_u16());
                }
            }
        }

        FetchError::Transport(format!("{:#}", err))
    }

    /// Short machine-readable name of the kind.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::NotFound => "not_found",
            FetchError::Unauthorized => "unauthorized",
            FetchError::RateLimited => "rate_limited",
            FetchError::Forbidden => "forbidden",
            FetchError::Client(_) => "client_error",
            FetchError::Server(_) => "server_error",
            FetchError::Transport(_) => "transport_error",
            FetchError::Decode(_) => "decode_error",
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::NotFound => write!(f, "not found"),
            FetchError::Unauthorized => {
                write!(f, "authentication failed, check your GITHUB_TOKEN")
            }
            FetchError::RateLimited => write!(
                f,
                "GitHub API rate limit exceeded, try again later or set GITHUB_TOKEN"
            ),
            FetchError::Forbidden => write!(f, "access forbidden"),
            FetchError::Client(status) => write!(f, "request rejected with HTTP {}", status),
            FetchError::Server(status) => write!(f, "GitHub returned HTTP {}", status),
            FetchError::Transport(msg) => write!(f, "network error: {}", msg),
            FetchError::Decode(_) => write!(f, "unexpected response from GitHub"),
        }
    }
}

impl std::error::Error for FetchError {}

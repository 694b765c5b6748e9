use anyhow::Result;
use log::debug;

use crate::analysis::RECENT_LIMIT;
use crate::github::DEFAULT_API_URL;
use crate::render::{OutputFormat, RenderOptions};
use crate::runtime::Runtime;

/// Environment variable holding the bearer credential.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Settings given on the command line. Unset values fall back to the environment or defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub retries: Option<usize>,
    pub recent: Option<usize>,
    pub output: OutputFormat,
    pub no_color: bool,
}

/// Resolved configuration, read once at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub token: Option<String>,
    pub retries: usize,
    pub recent_limit: usize,
    pub render: RenderOptions,
}

impl Config {
    pub fn load<R: Runtime>(runtime: &R, options: ConfigOptions) -> Result<Self> {
        let token = options
            .token
            .or_else(|| runtime.env_var(TOKEN_ENV).ok())
            .filter(|t| !t.is_empty());

        match &token {
            Some(token) => debug!("Using {} for authentication: {}", TOKEN_ENV, mask(token)),
            None => debug!("No {} set, requests are unauthenticated", TOKEN_ENV),
        }

        let color = options.output == OutputFormat::Table
            && !options.no_color
            && runtime.env_var("NO_COLOR").is_err()
            && runtime.stdout_is_terminal();

        Ok(Self {
            api_url: options
                .api_url
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token,
            retries: options.retries.unwrap_or(0),
            recent_limit: options.recent.unwrap_or(RECENT_LIMIT),
            render: RenderOptions {
                format: options.output,
                color,
            },
        })
    }
}

/// Keeps just enough of a token to recognise it in logs.
fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*********".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}

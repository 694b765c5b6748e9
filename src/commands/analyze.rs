use anyhow::{Context, Result};
use log::debug;
use std::io::Write;

use crate::{
    dashboard::{Session, search},
    github::GitHubApi,
    render::{OutputFormat, render},
    runtime::Runtime,
};

use super::config::{Config, ConfigOptions};
use super::services::build_github;

/// Analyze one account and print its dashboard.
#[tracing::instrument(skip(runtime, options))]
pub async fn analyze<R: Runtime>(runtime: R, username: &str, options: ConfigOptions) -> Result<()> {
    let config = Config::load(&runtime, options)?;
    let github = build_github(&config)?;
    run_analyze(&github, username, &config, &mut std::io::stdout()).await
}

/// Runs a single search and writes the result to `out`.
/// A failed search is returned as an error after any JSON output has been written.
pub async fn run_analyze<G: GitHubApi + ?Sized, W: Write>(
    github: &G,
    username: &str,
    config: &Config,
    out: &mut W,
) -> Result<()> {
    let mut session = Session::new(config.recent_limit);
    search(&mut session, github, username).await;

    if let Some(error) = session.error() {
        debug!("Search for {:?} ended with {}", username, error.kind);
        if config.render.format == OutputFormat::Json {
            writeln!(out, "{}", render(&session, &config.render)?)?;
        }
        anyhow::bail!("{}", error.message);
    }

    write!(out, "{}", render(&session, &config.render)?).context("Failed to write output")?;
    out.flush()?;
    Ok(())
}

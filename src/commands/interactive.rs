use anyhow::{Context, Result};
use log::debug;
use std::io::Write;

use crate::{
    dashboard::{Session, search},
    github::GitHubApi,
    render::render,
    runtime::Runtime,
};

use super::config::{Config, ConfigOptions};
use super::services::build_github;

pub const PROMPT: &str = "Enter GitHub username:";

/// Inputs that end the session instead of being searched.
const QUIT_COMMANDS: [&str; 2] = [":q", "quit"];

/// Prompt for usernames until end of input, showing a dashboard for each.
#[tracing::instrument(skip(runtime, options))]
pub async fn interactive<R: Runtime>(runtime: R, options: ConfigOptions) -> Result<()> {
    let config = Config::load(&runtime, options)?;
    let github = build_github(&config)?;
    run_interactive(&runtime, &github, &config, &mut std::io::stdout()).await
}

/// The prompt loop. Every submitted line is searched as-is, including an empty one.
pub async fn run_interactive<R: Runtime, G: GitHubApi + ?Sized, W: Write>(
    runtime: &R,
    github: &G,
    config: &Config,
    out: &mut W,
) -> Result<()> {
    let mut session = Session::new(config.recent_limit);

    while let Some(username) = runtime.prompt(PROMPT)? {
        if QUIT_COMMANDS.contains(&username.trim()) {
            debug!("Leaving interactive mode");
            break;
        }

        search(&mut session, github, &username).await;

        writeln!(out, "{}", render(&session, &config.render)?)
            .context("Failed to write output")?;
        out.flush()?;
    }

    Ok(())
}

//! Terminal and JSON output of a search session.

mod chart;
mod table;

use std::fmt::{Display, Write as _};

use anyhow::{Context, Result};
use nu_ansi_term::Color::{self, Cyan, Red, Yellow};

use crate::dashboard::{Dashboard, Session};
use crate::github::Profile;

pub use chart::{bar_chart, breakdown_chart};
pub use table::repository_table;

/// Fill colours for chart entries, cycled by position.
pub const PALETTE: [Color; 5] = [
    Color::Rgb(0xFF, 0x63, 0x84),
    Color::Rgb(0x36, 0xA2, 0xEB),
    Color::Rgb(0xFF, 0xCE, 0x56),
    Color::Rgb(0x4B, 0xC0, 0xC0),
    Color::Rgb(0x99, 0x66, 0xFF),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Charts and tables for the terminal
    #[default]
    Table,
    /// The session as pretty-printed JSON
    Json,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            color: false,
        }
    }
}

/// Applies ANSI colours only when enabled.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn paint<T: Display>(&self, color: Color, value: T) -> String {
        if self.enabled {
            color.paint(value.to_string()).to_string()
        } else {
            value.to_string()
        }
    }

    pub fn bold<T: Display>(&self, value: T) -> String {
        if self.enabled {
            nu_ansi_term::Style::new()
                .bold()
                .paint(value.to_string())
                .to_string()
        } else {
            value.to_string()
        }
    }
}

/// Renders the session in the requested format.
pub fn render(session: &Session, options: &RenderOptions) -> Result<String> {
    match options.format {
        OutputFormat::Table => Ok(render_text(session, Painter::new(options.color))),
        OutputFormat::Json => {
            serde_json::to_string_pretty(session).context("Failed to serialize session to JSON")
        }
    }
}

/// Text dashboard. The error line comes first; each dashboard block is
/// printed only when it has something to show.
pub fn render_text(session: &Session, painter: Painter) -> String {
    let mut out = String::new();

    if let Some(error) = session.error() {
        let _ = writeln!(out, "{}", painter.paint(Red, &error.message));
    }

    if let Some(dashboard) = session.dashboard() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&render_dashboard(dashboard, painter));
    }

    out
}

fn render_dashboard(dashboard: &Dashboard, painter: Painter) -> String {
    let mut out = render_profile(&dashboard.profile, painter);

    if let Some(notice) = &dashboard.repositories_notice {
        let _ = writeln!(out, "\n{}", painter.paint(Yellow, notice));
    }

    if !dashboard.language_counts.is_empty() {
        let _ = writeln!(
            out,
            "\n{}\n{}",
            painter.bold("Languages Used in Repositories"),
            bar_chart(&dashboard.language_counts, painter)
        );
    }

    if !dashboard.language_sizes.is_empty() {
        let _ = writeln!(
            out,
            "\n{}\n{}",
            painter.bold("Language Breakdown (by repository size)"),
            breakdown_chart(&dashboard.language_sizes, painter)
        );
    }

    if !dashboard.recent.is_empty() {
        let _ = writeln!(
            out,
            "\n{}",
            repository_table("Recent Repositories", &dashboard.recent, painter)
        );
    }

    if !dashboard.repositories.is_empty() {
        let title = format!("User Repositories: {}", dashboard.repositories.len());
        let _ = writeln!(
            out,
            "\n{}",
            repository_table(&title, &dashboard.repositories, painter)
        );
    }

    out
}

fn render_profile(profile: &Profile, painter: Painter) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", painter.bold(profile.display_name()));
    if !profile.avatar_url.is_empty() {
        let _ = writeln!(out, "Avatar: {}", painter.paint(Cyan, &profile.avatar_url));
    }
    if let Some(url) = profile.html_url.as_deref() {
        let _ = writeln!(out, "Profile: {}", painter.paint(Cyan, url));
    }
    if let Some(bio) = profile.bio.as_deref().filter(|b| !b.is_empty()) {
        let _ = writeln!(out, "{}", bio);
    }
    let _ = writeln!(out, "Followers: {}", profile.followers);
    let _ = writeln!(out, "Following: {}", profile.following);
    if let Some(count) = profile.public_repos {
        let _ = writeln!(out, "Public repositories: {}", count);
    }
    out
}

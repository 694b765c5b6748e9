use nu_ansi_term::Color::{Blue, Green, Yellow};
use tabled::{
    builder::Builder,
    settings::{Panel, Style, themes::BorderCorrection},
};

use crate::github::Repository;

use super::Painter;

/// Table of repositories with a title row.
pub fn repository_table(title: &str, repos: &[Repository], painter: Painter) -> String {
    let mut builder = Builder::new();
    builder.push_record([
        "Repository Name".to_string(),
        "Stars".to_string(),
        "Forks".to_string(),
        "Last Updated".to_string(),
        "URL".to_string(),
    ]);

    for repo in repos {
        builder.push_record([
            painter.paint(Blue, &repo.name),
            painter.paint(Yellow, repo.stargazers_count),
            painter.paint(Green, repo.forks_count),
            repo.updated_at.format("%Y-%m-%d").to_string(),
            repo.html_url.clone(),
        ]);
    }

    builder
        .build()
        .with(Panel::header(title))
        .with(Style::rounded())
        .with(BorderCorrection {})
        .to_string()
}

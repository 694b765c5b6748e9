//! Aggregations over a repository list.
//!
//! All functions are pure: they borrow the caller's slice and never reorder it.

use serde::Serialize;

use crate::github::Repository;

/// Default length of the recent list.
pub const RECENT_LIMIT: usize = 5;

/// Per-language totals kept in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct LanguageTotals {
    entries: Vec<LanguageTotal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageTotal {
    pub language: String,
    pub value: u64,
}

impl LanguageTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to `language`, appending it if this is its first appearance.
    pub fn add(&mut self, language: &str, amount: u64) {
        match self.entries.iter_mut().find(|e| e.language == language) {
            Some(entry) => entry.value += amount,
            None => self.entries.push(LanguageTotal {
                language: language.to_string(),
                value: amount,
            }),
        }
    }

    pub fn get(&self, language: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.language == language)
            .map(|e| e.value)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.language.as_str()).collect()
    }

    pub fn values(&self) -> Vec<u64> {
        self.entries.iter().map(|e| e.value).collect()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.value).sum()
    }

    /// Largest single value, 0 when empty.
    pub fn max(&self) -> u64 {
        self.entries.iter().map(|e| e.value).max().unwrap_or(0)
    }

    /// Fraction of the total held by `language`, in `0.0..=1.0`.
    pub fn share(&self, language: &str) -> Option<f64> {
        let total = self.total();
        let value = self.get(language)?;
        if total == 0 {
            return Some(0.0);
        }
        Some(value as f64 / total as f64)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageTotal> {
        self.entries.iter()
    }
}

fn tally(repos: &[Repository], amount: impl Fn(&Repository) -> u64) -> LanguageTotals {
    let mut totals = LanguageTotals::new();
    for repo in repos {
        if let Some(language) = repo.primary_language() {
            totals.add(language, amount(repo));
        }
    }
    totals
}

/// Number of repositories per primary language. Repositories without one are skipped.
pub fn language_counts(repos: &[Repository]) -> LanguageTotals {
    tally(repos, |_| 1)
}

/// Sum of repository `size` per primary language.
pub fn language_sizes(repos: &[Repository]) -> LanguageTotals {
    tally(repos, |repo| repo.size)
}

/// The `limit` most recently updated repositories, newest first.
/// Sorts a copy; `repos` keeps its order.
pub fn recent_repositories(repos: &[Repository], limit: usize) -> Vec<Repository> {
    let mut sorted = repos.to_vec();
    sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    sorted.truncate(limit);
    sorted
}

use crate::types::{Contributor, LanguageStats, RepositoryStats};
use chrono::NaiveDate;
use serde::Serialize;

/// Languages shown in the breakdown.
pub const TOP_LANGUAGES: usize = 10;
/// Contributors shown in the summary.
pub const TOP_CONTRIBUTORS: usize = 10;

/// Headline numbers for a repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub name: String,
    pub description: String,
    pub html_url: String,
    pub owner: String,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    pub language: String,
    pub default_branch: String,
    pub created: NaiveDate,
    pub updated: NaiveDate,
}

impl Summary {
    pub fn from_stats(stats: &RepositoryStats) -> Self {
        let repo = &stats.repository;
        Self {
            name: repo.name.clone(),
            description: repo
                .description
                .clone()
                .unwrap_or_else(|| "No description available".to_string()),
            html_url: repo.html_url.clone(),
            owner: repo.owner.login.clone(),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            open_issues: repo.open_issues_count,
            language: repo.language.clone().unwrap_or_else(|| "N/A".to_string()),
            default_branch: repo.default_branch.clone(),
            created: repo.created_at.date_naive(),
            updated: repo.updated_at.date_naive(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageShare {
    pub name: String,
    pub bytes: u64,
    /// Share of all bytes, rounded to one decimal place.
    pub percentage: f64,
}

/// Languages by byte count, largest first, at most `limit` entries.
///
/// Percentages are relative to every language in the map, not just the
/// ones that make the cut.
pub fn language_breakdown(languages: &LanguageStats, limit: usize) -> Vec<LanguageShare> {
    let total: u64 = languages.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut shares: Vec<LanguageShare> = languages
        .iter()
        .map(|(name, &bytes)| LanguageShare {
            name: name.clone(),
            bytes,
            percentage: round_one_decimal(bytes as f64 / total as f64 * 100.0),
        })
        .collect();

    // stable sort keeps alphabetical order among equal byte counts
    shares.sort_by(|a, b| b.bytes.cmp(&a.bytes));
    shares.truncate(limit);
    shares
}

/// Contributors ranked by contribution count, at most `limit` entries.
pub fn top_contributors(contributors: &[Contributor], limit: usize) -> Vec<&Contributor> {
    let mut ranked: Vec<&Contributor> = contributors.iter().collect();
    ranked.sort_by(|a, b| b.contributions.cmp(&a.contributions));
    ranked.truncate(limit);
    ranked
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

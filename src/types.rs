//! Serde models for the REST payloads the dashboard consumes.
//!
//! Only the fields the dashboard reads are modelled; everything else in the
//! API responses is ignored during deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: DateTime<Utc>,
    pub default_branch: String,
    pub owner: Account,
}

/// Repository owner as embedded in the repository payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    pub contributions: u64,
    pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub commit: CommitDetail,
    /// `null` when the commit email is not linked to an account.
    pub author: Option<CommitUser>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitDetail {
    pub message: String,
    pub author: CommitSignature,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitSignature {
    pub name: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitUser {
    pub login: String,
    pub avatar_url: String,
}

impl Commit {
    /// First line of the commit message.
    pub fn headline(&self) -> &str {
        self.commit.message.lines().next().unwrap_or_default()
    }

    pub fn short_sha(&self) -> &str {
        let end = self.sha.len().min(7);
        &self.sha[..end]
    }

    /// Account login when linked, otherwise the git author name.
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|a| a.login.as_str())
            .unwrap_or(&self.commit.author.name)
    }
}

/// Language name to number of bytes of code.
pub type LanguageStats = BTreeMap<String, u64>;

/// Joined result of the per-endpoint calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryStats {
    pub repository: Repository,
    pub contributors: Vec<Contributor>,
    pub languages: LanguageStats,
    pub recent_commits: Vec<Commit>,
}

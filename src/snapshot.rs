//! Pre-fetched statistics written at build time.
//!
//! A snapshot is the [`RepositoryStats`] JSON with two extra top-level keys,
//! `snapshotDate` and `snapshotInfo`, so consumers that only understand the
//! live payload can read it unchanged.

use crate::activity::DateWindow;
use crate::github::{CommitScope, GithubClient};
use crate::types::RepositoryStats;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(flatten)]
    pub stats: RepositoryStats,
    pub snapshot_date: DateTime<Utc>,
    pub snapshot_info: SnapshotInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotInfo {
    pub generated_at: DateTime<Utc>,
    /// `owner/repo`
    pub repository: String,
    pub data_range: DateWindow,
    pub commits_count: usize,
}

impl Snapshot {
    pub fn capture(stats: RepositoryStats, repository: &str, window: DateWindow) -> Self {
        let commits_count = stats.recent_commits.len();
        Self {
            stats,
            snapshot_date: window.to,
            snapshot_info: SnapshotInfo {
                generated_at: window.to,
                repository: repository.to_string(),
                data_range: window,
                commits_count,
            },
        }
    }

    /// Fetch `days` of commit history plus the other stats and wrap them.
    pub async fn fetch(
        client: &GithubClient,
        owner: &str,
        repo: &str,
        now: DateTime<Utc>,
        days: u32,
    ) -> Result<Self> {
        let window = DateWindow::ending(now, days);
        let stats = client
            .repository_stats(owner, repo, CommitScope::Since(window.from))
            .await
            .with_context(|| format!("Failed to fetch snapshot data for {owner}/{repo}"))?;
        Ok(Self::capture(stats, &format!("{owner}/{repo}"), window))
    }

    /// Write as pretty JSON, creating parent directories as needed.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize snapshot")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
        info!(path = %path.display(), commits = self.snapshot_info.commits_count, "snapshot saved");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse snapshot {}", path.display()))
    }
}

/// Where dashboard data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsSource {
    /// Read a snapshot written earlier; no network access.
    Snapshot(PathBuf),
    /// Fetch from the API now.
    Live {
        owner: String,
        repo: String,
        scope: CommitScope,
    },
}

impl StatsSource {
    /// Resolve the source into stats. `client` is only needed for `Live`.
    pub async fn load(&self, client: Option<&GithubClient>) -> Result<RepositoryStats> {
        match self {
            StatsSource::Snapshot(path) => Ok(Snapshot::load(path)?.stats),
            StatsSource::Live { owner, repo, scope } => {
                let client = client.context("A GitHub client is required for live data")?;
                Ok(client.repository_stats(owner, repo, *scope).await?)
            }
        }
    }
}

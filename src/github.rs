use crate::config::Config;
use crate::error::{GithubError, api_error_message};
use crate::types::{Commit, Contributor, LanguageStats, Repository, RepositoryStats};
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Contributors listed on the dashboard.
pub const CONTRIBUTORS_PER_PAGE: u32 = 10;
/// Commits fetched when no time window is requested.
pub const DEFAULT_RECENT_COMMITS: u32 = 10;
/// Page size used while walking commit history.
pub const COMMITS_PAGE_SIZE: usize = 100;
/// Upper bound on commits collected by a windowed fetch.
pub const MAX_WINDOW_COMMITS: usize = 1000;

const ACCEPT_V3: &str = "application/vnd.github.v3+json";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Which commits to include in [`RepositoryStats::recent_commits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitScope {
    /// The latest `n` commits on the default branch.
    Recent(u32),
    /// Every commit since the given instant, up to [`MAX_WINDOW_COMMITS`].
    Since(DateTime<Utc>),
}

impl Default for CommitScope {
    fn default() -> Self {
        CommitScope::Recent(DEFAULT_RECENT_COMMITS)
    }
}

#[derive(Clone)]
pub struct GithubClient {
    token: Arc<String>,
    http: Arc<Client>,
    base_url: Arc<String>,
    user_agent: Arc<String>,
}

impl GithubClient {
    /// Create a REST client from `config`. A token is mandatory.
    pub fn new(config: &Config) -> Result<Self, GithubError> {
        let token = config.token.clone().ok_or(GithubError::MissingToken)?;
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(GithubError::Client)?;

        Ok(Self {
            token: Arc::new(token),
            http: Arc::new(http),
            base_url: Arc::new(config.api_base.trim_end_matches('/').to_string()),
            user_agent: Arc::new(config.user_agent.clone()),
        })
    }

    /// Low-level GET returning the decoded JSON body. Any non-2xx status is an error.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, GithubError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, ?query, "GET");

        let resp = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(&*self.token)
            .header(ACCEPT, ACCEPT_V3)
            .header(USER_AGENT, &*self.user_agent)
            .send()
            .await
            .map_err(|source| GithubError::Network {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.bytes().await.unwrap_or_default();
            return Err(GithubError::Api {
                status: status.as_u16(),
                message: api_error_message(status, &body),
            });
        }

        resp.json::<T>().await.map_err(|source| GithubError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    pub async fn repository(&self, owner: &str, repo: &str) -> Result<Repository, GithubError> {
        self.get_json(&format!("/repos/{owner}/{repo}"), &[]).await
    }

    /// Top contributors, as ranked by the API.
    pub async fn contributors(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<Contributor>, GithubError> {
        self.get_json(
            &format!("/repos/{owner}/{repo}/contributors"),
            &[("per_page", CONTRIBUTORS_PER_PAGE.to_string())],
        )
        .await
    }

    pub async fn languages(&self, owner: &str, repo: &str) -> Result<LanguageStats, GithubError> {
        self.get_json(&format!("/repos/{owner}/{repo}/languages"), &[])
            .await
    }

    pub async fn recent_commits(
        &self,
        owner: &str,
        repo: &str,
        limit: u32,
    ) -> Result<Vec<Commit>, GithubError> {
        self.get_json(
            &format!("/repos/{owner}/{repo}/commits"),
            &[("per_page", limit.to_string())],
        )
        .await
    }

    /// All commits authored after `since`, walking pages until the history
    /// runs out or [`MAX_WINDOW_COMMITS`] is reached.
    pub async fn commits_since(
        &self,
        owner: &str,
        repo: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Commit>, GithubError> {
        let path = format!("/repos/{owner}/{repo}/commits");
        let endpoint = path.as_str();
        let since_param = since.to_rfc3339_opts(SecondsFormat::Secs, true);

        let commits = collect_pages(COMMITS_PAGE_SIZE, MAX_WINDOW_COMMITS, move |page| {
            let query = [
                ("since", since_param.clone()),
                ("per_page", COMMITS_PAGE_SIZE.to_string()),
                ("page", page.to_string()),
            ];
            async move { self.get_json::<Vec<Commit>>(endpoint, &query).await }
        })
        .await?;

        info!(owner, repo, %since, count = commits.len(), "collected windowed commits");
        Ok(commits)
    }

    /// Repository, contributors, languages and commits fetched concurrently
    /// and joined. The first failure aborts the whole call.
    pub async fn repository_stats(
        &self,
        owner: &str,
        repo: &str,
        scope: CommitScope,
    ) -> Result<RepositoryStats, GithubError> {
        info!(owner, repo, ?scope, "fetching repository stats");

        let commits = async {
            match scope {
                CommitScope::Recent(limit) => self.recent_commits(owner, repo, limit).await,
                CommitScope::Since(since) => self.commits_since(owner, repo, since).await,
            }
        };

        let joined = tokio::try_join!(
            self.repository(owner, repo),
            self.contributors(owner, repo),
            self.languages(owner, repo),
            commits
        );

        match joined {
            Ok((repository, contributors, languages, recent_commits)) => Ok(RepositoryStats {
                repository,
                contributors,
                languages,
                recent_commits,
            }),
            Err(err) => {
                error!(owner, repo, error = %err, "Error fetching repository stats");
                Err(err)
            }
        }
    }
}

/// Drive a page-numbered listing starting at page 1.
///
/// Stops on an empty page, on a page shorter than `per_page`, or once `cap`
/// items have been collected. The result never exceeds `cap` items.
pub async fn collect_pages<T, E, F, Fut>(
    per_page: usize,
    cap: usize,
    mut fetch_page: F,
) -> Result<Vec<T>, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
{
    let mut items = Vec::new();
    let mut page = 1u32;

    loop {
        let batch = fetch_page(page).await?;
        let len = batch.len();
        debug!(page, len, "fetched page");
        items.extend(batch);

        if len == 0 || len < per_page || items.len() >= cap {
            break;
        }
        page += 1;
    }

    items.truncate(cap);
    Ok(items)
}

//! Repository statistics for a static dashboard.
//!
//! Fetches stars, forks, contributors, languages and commits for one
//! repository from a GitHub-compatible REST API, either live or into a
//! snapshot file that a static site build reads later.
//!
//! - [`github`]: REST client, pagination and the joined stats fetch
//! - [`snapshot`]: snapshot file format and the live/snapshot data source
//! - [`stats`] / [`activity`]: derived numbers (language shares, daily commits)
//! - [`report`]: plain-text rendering for the terminal

pub mod activity;
pub mod config;
pub mod error;
pub mod github;
pub mod report;
pub mod snapshot;
pub mod stats;
pub mod types;

pub use config::Config;
pub use error::GithubError;
pub use github::{CommitScope, GithubClient};
pub use snapshot::{Snapshot, StatsSource};
pub use types::RepositoryStats;

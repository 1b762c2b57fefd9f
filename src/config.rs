//! Runtime configuration loaded from environment variables.
//!
//! `.env.local` and `.env` are read first when present, so a local token
//! file works the same way as exported variables.
//!
//! ## Variables
//!
//! - `GITHUB_TOKEN` / `TOKEN` - API token (first one set wins)
//! - `GITHUB_API_BASE` - API root (default: `https://api.github.com`)
//! - `GITHUB_USER_AGENT` - User-Agent header (default: `GitHub-Dashboard`)
//! - `RUST_LOG` - Log filter (default: `info`)
//! - `LOG_FORMAT` - `text` or `json` (default: `text`)

use std::env;
use std::io;
use std::path::Path;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = "GitHub-Dashboard";
pub const DEFAULT_OWNER: &str = "OpenHands";
pub const DEFAULT_REPO: &str = "OpenHands";
pub const DEFAULT_SNAPSHOT_PATH: &str = "data/snapshot.json";
pub const DEFAULT_WINDOW_DAYS: u32 = 30;
/// Longest commit window accepted on the command line (about ten years).
pub const MAX_WINDOW_DAYS: u32 = 3650;

const DOTENV_FILES: [&str; 2] = [".env.local", ".env"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: Option<String>,
    pub api_base: String,
    pub user_agent: String,
    pub log_level: String,
    pub log_format: LogFormat,
}

/// Load `.env.local` then `.env` into the process environment.
///
/// Variables already set are not overridden. Missing files are skipped; any
/// other failure (unreadable or malformed file) is returned so the caller can
/// report it once logging is up.
pub fn load_env_files() -> Vec<(&'static str, dotenvy::Error)> {
    DOTENV_FILES
        .into_iter()
        .filter_map(|file| load_env_file(Path::new(file)).map(|err| (file, err)))
        .collect()
}

/// `None` when the file loaded or does not exist.
pub fn load_env_file(path: &Path) -> Option<dotenvy::Error> {
    match dotenvy::from_filename(path) {
        Ok(_) => None,
        Err(dotenvy::Error::Io(err)) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => Some(err),
    }
}

impl Config {
    /// Reads dotenv files (if any) and then the process environment.
    ///
    /// Returns the config plus any dotenv file that failed to load.
    pub fn load() -> (Self, Vec<(&'static str, dotenvy::Error)>) {
        let failures = load_env_files();
        (Self::from_env(), failures)
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = non_empty("GITHUB_TOKEN").or_else(|| non_empty("TOKEN"));
        let api_base = non_empty("GITHUB_API_BASE")
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let user_agent =
            non_empty("GITHUB_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let log_level = non_empty("RUST_LOG").unwrap_or_else(|| "info".to_string());
        let log_format = non_empty("LOG_FORMAT")
            .map(|v| LogFormat::parse(&v))
            .unwrap_or(LogFormat::Text);

        Self {
            token,
            api_base,
            user_agent,
            log_level,
            log_format,
        }
    }

    /// Config pointing at `api_base` with a fixed token; used by tests and embedders.
    pub fn with_token(api_base: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

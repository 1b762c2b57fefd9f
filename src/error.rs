use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("GITHUB_TOKEN or TOKEN is not set in environment variables")]
    MissingToken,

    #[error("GitHub API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Network error requesting {endpoint}: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse JSON from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl GithubError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            GithubError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Message for a non-2xx response.
///
/// Uses the `message` field of a JSON error body. A JSON body without one,
/// or with an empty one, falls back to the status' reason phrase; a body
/// that is not JSON at all yields `Unknown error`.
pub(crate) fn api_error_message(status: StatusCode, body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
        }) if !message.is_empty() => message,
        Ok(_) => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
        Err(_) => "Unknown error".to_string(),
    }
}

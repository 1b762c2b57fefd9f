//! In-process fake of the REST endpoints the client calls.
#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

/// Owner that makes every repository endpoint answer 404 with a JSON message.
pub const OWNER_GONE: &str = "gone";
/// Owner whose repository endpoint answers 500 with a non-JSON body.
pub const OWNER_BROKEN: &str = "broken";
/// Owner whose languages endpoint answers 502 with JSON lacking `message`.
pub const OWNER_FLAKY: &str = "flaky";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub uri: String,
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Clone)]
pub struct FakeApi {
    total_commits: usize,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeApi {
    pub fn with_commits(total_commits: usize) -> Self {
        Self {
            total_commits,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Recorded URIs whose path starts with `prefix`.
    pub fn uris_for(&self, prefix: &str) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| r.uri)
            .filter(|u| u.starts_with(prefix))
            .collect()
    }

    fn record(&self, uri: &Uri, headers: &HeaderMap) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().unwrap().push(RecordedRequest {
            uri: uri.to_string(),
            authorization: header("authorization"),
            accept: header("accept"),
            user_agent: header("user-agent"),
        });
    }

    /// Bind to an ephemeral port and return the base URL.
    pub async fn spawn(self) -> String {
        let router = Router::new()
            .route("/repos/{owner}/{repo}", get(repository))
            .route("/repos/{owner}/{repo}/contributors", get(contributors))
            .route("/repos/{owner}/{repo}/languages", get(languages))
            .route("/repos/{owner}/{repo}/commits", get(commits))
            .with_state(self);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest"
        })),
    )
        .into_response()
}

async fn repository(
    State(api): State<FakeApi>,
    Path((owner, repo)): Path<(String, String)>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    api.record(&uri, &headers);
    match owner.as_str() {
        OWNER_GONE => not_found(),
        OWNER_BROKEN => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        _ => Json(repository_json(&owner, &repo)).into_response(),
    }
}

async fn contributors(
    State(api): State<FakeApi>,
    Path((owner, _repo)): Path<(String, String)>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    api.record(&uri, &headers);
    if owner == OWNER_GONE {
        return not_found();
    }
    Json(json!([
        {
            "login": "alice",
            "id": 1,
            "avatar_url": "https://avatars.example.com/1",
            "contributions": 420,
            "html_url": "https://github.com/alice",
            "type": "User"
        },
        {
            "login": "bob",
            "id": 2,
            "avatar_url": "https://avatars.example.com/2",
            "contributions": 42,
            "html_url": "https://github.com/bob",
            "type": "User"
        }
    ]))
    .into_response()
}

async fn languages(
    State(api): State<FakeApi>,
    Path((owner, _repo)): Path<(String, String)>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    api.record(&uri, &headers);
    match owner.as_str() {
        OWNER_GONE => not_found(),
        OWNER_FLAKY => (StatusCode::BAD_GATEWAY, Json(json!({}))).into_response(),
        _ => Json(json!({ "Python": 7000, "TypeScript": 2500, "Shell": 500 })).into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct CommitsQuery {
    per_page: Option<usize>,
    page: Option<usize>,
    since: Option<String>,
}

async fn commits(
    State(api): State<FakeApi>,
    Path((owner, _repo)): Path<(String, String)>,
    Query(query): Query<CommitsQuery>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    api.record(&uri, &headers);
    if owner == OWNER_GONE {
        return not_found();
    }

    // the real API defaults to 30 per page
    let per_page = query.per_page.unwrap_or(30);
    let page = query.page.unwrap_or(1).max(1);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(api.total_commits);
    let since = query.since.unwrap_or_else(|| "2024-05-01T00:00:00Z".to_string());

    let items: Vec<Value> = (start..end).map(|i| commit_json(i, &since)).collect();
    Json(Value::Array(items)).into_response()
}

pub fn repository_json(owner: &str, repo: &str) -> Value {
    json!({
        "id": 42,
        "node_id": "R_42",
        "name": repo,
        "full_name": format!("{owner}/{repo}"),
        "private": false,
        "description": "An example repository",
        "html_url": format!("https://github.com/{owner}/{repo}"),
        "stargazers_count": 61234,
        "watchers_count": 61234,
        "forks_count": 7001,
        "open_issues_count": 321,
        "language": "Python",
        "created_at": "2024-03-13T17:30:00Z",
        "updated_at": "2024-06-01T08:00:00Z",
        "pushed_at": "2024-06-01T07:59:00Z",
        "default_branch": "main",
        "owner": {
            "login": owner,
            "id": 7,
            "avatar_url": format!("https://avatars.example.com/{owner}"),
            "html_url": format!("https://github.com/{owner}")
        }
    })
}

fn commit_json(index: usize, date: &str) -> Value {
    let author = if index % 2 == 0 {
        json!({ "login": "alice", "avatar_url": "https://avatars.example.com/1" })
    } else {
        Value::Null
    };
    json!({
        "sha": format!("{index:040x}"),
        "commit": {
            "message": format!("Commit number {index}\n\nBody text"),
            "author": { "name": "Dev", "email": "dev@example.com", "date": date }
        },
        "author": author
    })
}

use reqwest::StatusCode;
use thiserror::Error;

/// Possible failures while obtaining a session token.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("login failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("no access_token returned")]
    MissingToken,
    #[error("unable to parse login response: {source} (content: {body})")]
    Parse {
        source: serde_json::Error,
        body: String,
    },
    #[error("login request failed: {0}")]
    Transport(reqwest::Error),
    #[error("invalid login URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Possible failures of an authenticated request.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("need to login first")]
    NotAuthenticated,
    #[error("status code {status}, content of response: {body}")]
    ClientError { status: StatusCode, body: String },
    #[error("got HTTP status code {} from {path}", .status.as_u16())]
    RetriesExhausted { status: StatusCode, path: String },
    #[error("request failed: {0}")]
    Transport(reqwest::Error),
    #[error("unable to read response body: {0}")]
    Body(reqwest::Error),
    #[error("invalid request path {path:?}: {source}")]
    InvalidPath {
        path: String,
        source: url::ParseError,
    },
    #[error("request path {path:?} leaves the API base")]
    OutsideBase { path: String },
}

impl RequestError {
    /// Whether this error should terminate the caller rather than be reported and skipped.
    /// That is the case once retries are spent, or when the portal could not be reached at all.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RequestError::RetriesExhausted { .. } | RequestError::Transport(_)
        )
    }
}

/// Configuration could not be assembled from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid API URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("unable to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Only GET and POST are spoken by the portal client.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("only GET/POST supported, got {0}")]
pub struct UnsupportedMethod(pub String);

//! Error hierarchy for the GitLab client.
//!
//! Goals:
//! - Single root `GitLabError` for all public functions.
//! - Status-aware mapping (401→Unauthorized, 429→RateLimited, 5xx→Server, etc.).
//! - Ergonomic `?` via `From` impls, no dynamic dispatch.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type GitLabResult<T> = Result<T, GitLabError>;

/// Root error type for the gitlab-api crate.
#[derive(Debug, Error)]
pub enum GitLabError {
    /// Unauthorized (HTTP 401). Usually a bad or expired PRIVATE-TOKEN.
    #[error("gitlab: unauthorized")]
    Unauthorized,

    /// Forbidden (HTTP 403).
    #[error("gitlab: forbidden")]
    Forbidden,

    /// Not found (HTTP 404). Project, MR, note or discussion does not exist.
    #[error("gitlab: not found")]
    NotFound,

    /// Rate limited (HTTP 429).
    #[error("gitlab: rate limited")]
    RateLimited { retry_after_secs: Option<u64> },

    /// Server error (HTTP 5xx).
    #[error("gitlab: server error, status {0}")]
    Server(u16),

    /// Other HTTP status (4xx/3xx) not covered above.
    #[error("gitlab: http status error: {0}")]
    HttpStatus(u16),

    /// Timeout at transport level.
    #[error("gitlab: timeout")]
    Timeout,

    /// Network/transport failure without status (DNS/connect/reset).
    #[error("gitlab: network error: {0}")]
    Network(String),

    /// JSON deserialization error.
    #[error("gitlab: serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Unexpected/invalid shape of a GitLab response.
    #[error("gitlab: invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration problems (bad token header value, bad proxy URL).
    #[error("gitlab: config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for GitLabError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return GitLabError::Timeout;
        }
        if let Some(status) = e.status() {
            let code = status.as_u16();
            return match code {
                401 => GitLabError::Unauthorized,
                403 => GitLabError::Forbidden,
                404 => GitLabError::NotFound,
                429 => GitLabError::RateLimited {
                    retry_after_secs: None,
                },
                500..=599 => GitLabError::Server(code),
                _ => GitLabError::HttpStatus(code),
            };
        }
        GitLabError::Network(e.to_string())
    }
}

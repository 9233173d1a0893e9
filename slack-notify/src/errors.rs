//! Error types for the Slack client.

use thiserror::Error;

pub type SlackResult<T> = Result<T, SlackError>;

#[derive(Debug, Error)]
pub enum SlackError {
    /// Slack answered with `ok: false`; carries the API error code
    /// (e.g. "channel_not_found", "invalid_auth").
    #[error("slack: {method} failed: {error}")]
    Api { method: &'static str, error: String },

    /// Transport-level failure (DNS/connect/timeout/TLS).
    #[error("slack: transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// Configuration problems (empty token, bad channel id).
    #[error("slack: config error: {0}")]
    Config(String),
}

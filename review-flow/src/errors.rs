//! Error type for the webhook pipeline.

use thiserror::Error;

pub type FlowResult<T> = Result<T, FlowError>;

#[derive(Debug, Error)]
pub enum FlowError {
    /// Shared-secret mismatch. Raised before the payload is inspected.
    #[error("invalid webhook secret")]
    Unauthorized,

    /// Payload did not deserialize as the declared event type.
    #[error("malformed webhook payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error(transparent)]
    GitLab(#[from] gitlab_api::GitLabError),

    #[error(transparent)]
    Slack(#[from] slack_notify::SlackError),

    #[error(transparent)]
    AiReview(#[from] ai_review::AiReviewError),
}

//! Unified error handling for the ai-review crate.
//!
//! One top-level [`AiReviewError`] for the whole crate, with config problems
//! grouped in [`ConfigError`]. Local failures (token ceiling, parse) are kept
//! distinct from transport/provider failures so callers can tell a contract
//! violation from a network fault.

use thiserror::Error;

/// Unified result alias for the crate.
pub type AiResult<T> = std::result::Result<T, AiReviewError>;

/// Top-level error for the ai-review crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiReviewError {
    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Underlying HTTP transport error.
    #[error("ai-review: transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// Non-2xx status from the AI provider.
    #[error("ai-review: provider returned status {status}: {snippet}")]
    HttpStatus { status: u16, snippet: String },

    /// Provider response decoded but contained no usable text block.
    #[error("ai-review: provider response contained no text content")]
    EmptyContent,

    /// Prompt would exceed the configured input-token ceiling.
    ///
    /// Detected locally before any network call.
    #[error("ai-review: prompt of ~{estimated} tokens exceeds budget of {budget}")]
    TokenLimit { estimated: usize, budget: usize },

    /// The model's text did not contain the expected JSON object.
    ///
    /// A collaborator contract violation, not a network fault.
    #[error("ai-review: failed to parse model response: {0}")]
    Parse(String),

    /// GitLab side of the orchestration failed.
    #[error(transparent)]
    GitLab(#[from] gitlab_api::GitLabError),
}

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required setting is missing or empty.
    #[error("ai-review: missing required setting: {0}")]
    MissingSetting(&'static str),

    /// Endpoint had the wrong format (must be http:// or https://).
    #[error("ai-review: invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Token budget settings are inconsistent.
    #[error("ai-review: max_input_tokens ({input}) must exceed max_output_tokens ({output})")]
    InvalidTokenBudget { input: usize, output: usize },
}

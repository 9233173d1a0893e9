//! AI merge-request review: Anthropic client + orchestration.
//!
//! The orchestrator runs one attempt end to end:
//! 1. fetch MR changes from GitLab
//! 2. serialize diffs into a single prompt block
//! 3. pre-flight token admission check (local, before any network call)
//! 4. non-streaming Anthropic messages request
//! 5. extract and decode the JSON object embedded in the model's prose
//! 6. render the Korean review comment and post it as one MR note
//!
//! Any step's failure aborts the whole call; no partial comment is ever
//! posted and nothing is retried.

pub mod anthropic;
pub mod config;
pub mod errors;
pub mod orchestrator;
pub mod parse;
pub mod prompt;
pub mod tokens;

pub use config::AiEngineConfig;
pub use errors::{AiResult, AiReviewError};
pub use orchestrator::{AiReviewContext, AiReviewOrchestrator, ReviewMetadata, ReviewResult};

//! Webhook event classification and notification/orchestration pipeline.
//!
//! Control flow for one inbound GitLab webhook:
//!
//! 1. **Dispatch** — shared-secret check, then a switch on the
//!    `X-Gitlab-Event` header. Unknown event types are ignored, never errors.
//! 2. **Classify** — a note body is matched against the ordered table of
//!    bracketed trigger phrases; no match means "not a review command".
//! 3. **Build** — the validated payload becomes a transport-agnostic
//!    notification record; `Response` notifications are best-effort enriched
//!    with discussion-thread participants from the GitLab API.
//! 4. **Render + send** — the record is projected into Slack blocks and
//!    posted, OR (for the AI trigger) the review orchestrator runs instead.
//!
//! Exactly one downstream path executes per webhook; notification and AI
//! review are mutually exclusive by trigger kind.

pub mod dispatch;
pub mod errors;
pub mod mention;
pub mod message;
pub mod notification;
pub mod triggers;
pub mod types;

pub use dispatch::{DispatchOutcome, WebhookDispatcher};
pub use errors::{FlowError, FlowResult};
pub use mention::MentionTable;
pub use triggers::{TriggerKind, classify};

#[cfg(test)]
mod dispatch_tests;

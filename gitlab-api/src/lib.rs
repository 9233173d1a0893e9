//! GitLab REST v4 client used by the webhook pipeline.
//!
//! Covers exactly the endpoints the pipeline needs:
//! - GET    /projects/:id/merge_requests/:iid/changes
//! - POST   /projects/:id/merge_requests/:iid/notes
//! - GET    /projects/:id/merge_requests/:iid/notes        (with sort options)
//! - GET    /projects/:id/merge_requests/:iid/notes/:note_id
//! - PUT    /projects/:id/merge_requests/:iid/notes/:note_id
//! - DELETE /projects/:id/merge_requests/:iid/notes/:note_id
//! - GET    /projects/:id/merge_requests/:iid/discussions/:discussion_id
//!
//! No async-trait and no boxed trait objects; a single concrete client with
//! plain `async fn` methods and a unified error type.

pub mod client;
pub mod errors;
pub mod types;

pub use client::{GitLabClient, GitLabConfig};
pub use errors::{GitLabError, GitLabResult};
pub use types::*;

//! Webhook payload model and the notification records derived from it.
//!
//! The webhook structs deserialize only the subset of GitLab's hook bodies
//! the pipeline reads. Fields that feed the actionability guard are
//! serde-defaulted so an absent or half-filled `merge_request` block is a
//! validation miss, not a deserialization error.

use serde::Deserialize;

use crate::triggers::TriggerKind;

/// `X-Gitlab-Event` header value for note hooks.
pub const NOTE_HOOK_EVENT: &str = "Note Hook";
/// `X-Gitlab-Event` header value for merge request hooks.
pub const MERGE_REQUEST_HOOK_EVENT: &str = "Merge Request Hook";

// ---------------------------------------------------------------------------
// Inbound webhook shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookUser {
    pub id: u64,
    pub name: String,
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookProject {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub path_with_namespace: String,
}

/// `object_attributes` of a note hook.
#[derive(Debug, Clone, Deserialize)]
pub struct NoteAttributes {
    pub note: String,
    #[serde(default)]
    pub noteable_type: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub discussion_id: Option<String>,
}

/// The `merge_request` block attached to a note hook.
///
/// Everything is defaulted; `actionable_merge_request` decides whether the
/// block is usable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MergeRequestSummary {
    #[serde(default)]
    pub iid: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub author_id: u64,
    #[serde(default)]
    pub author: Option<NamedAuthor>,
    #[serde(default)]
    pub source_branch: String,
    #[serde(default)]
    pub target_branch: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub last_commit: Option<LastCommit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedAuthor {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastCommit {
    #[serde(default)]
    pub author: Option<NamedAuthor>,
}

/// Note hook body (comment created on commit/MR/issue/snippet).
#[derive(Debug, Clone, Deserialize)]
pub struct NoteHook {
    pub user: WebhookUser,
    pub project: WebhookProject,
    pub object_attributes: NoteAttributes,
    #[serde(default)]
    pub merge_request: Option<MergeRequestSummary>,
}

impl NoteHook {
    /// Returns the MR block when this note is actionable: it must be a note
    /// on a merge request and the block must carry a title and URL.
    pub fn actionable_merge_request(&self) -> Option<&MergeRequestSummary> {
        if self.object_attributes.noteable_type != "MergeRequest" {
            return None;
        }
        self.merge_request
            .as_ref()
            .filter(|mr| !mr.title.is_empty() && !mr.url.is_empty())
    }
}

/// `object_attributes` of a merge request hook.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeRequestAttributes {
    #[serde(default)]
    pub iid: u64,
    pub title: String,
    pub url: String,
    pub source_branch: String,
    pub target_branch: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub action: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookReviewer {
    pub id: u64,
    pub name: String,
}

/// Merge request hook body (open/update/merge/close/...).
#[derive(Debug, Clone, Deserialize)]
pub struct MergeRequestHook {
    pub user: WebhookUser,
    pub project: WebhookProject,
    pub object_attributes: MergeRequestAttributes,
    #[serde(default)]
    pub reviewers: Vec<WebhookReviewer>,
}

/// One inbound delivery, tagged by the `X-Gitlab-Event` header and validated
/// into a typed payload exactly once at the boundary.
#[derive(Debug, Clone)]
pub enum WebhookEvent {
    Note(NoteHook),
    MergeRequest(MergeRequestHook),
    Unknown(String),
}

impl WebhookEvent {
    pub fn parse(event_type: &str, payload: serde_json::Value) -> serde_json::Result<Self> {
        match event_type {
            NOTE_HOOK_EVENT => Ok(WebhookEvent::Note(serde_json::from_value(payload)?)),
            MERGE_REQUEST_HOOK_EVENT => {
                Ok(WebhookEvent::MergeRequest(serde_json::from_value(payload)?))
            }
            other => Ok(WebhookEvent::Unknown(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Derived notification records
// ---------------------------------------------------------------------------

/// A user referenced inside a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: u64,
    pub name: String,
}

/// Discussion-thread context attached to `Response` notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionContext {
    pub id: String,
    pub original_author: Participant,
    pub last_reply_author: Participant,
}

/// Merge request details carried by a review notification.
#[derive(Debug, Clone)]
pub struct MergeRequestInfo {
    pub title: String,
    pub url: String,
    pub author_id: u64,
    pub author: String,
    pub source_branch: String,
    pub target_branch: String,
    pub state: String,
}

/// Canonical output of the notification builder for note events.
#[derive(Debug, Clone)]
pub struct ReviewNotification {
    pub kind: TriggerKind,
    pub actor_id: u64,
    pub actor_name: String,
    pub project: String,
    pub merge_request: MergeRequestInfo,
    pub note: String,
    pub note_url: String,
    /// Present only for `Response` notifications whose discussion thread
    /// could be fetched.
    pub discussion: Option<DiscussionContext>,
}

/// Merge request details carried by a merge notification.
#[derive(Debug, Clone)]
pub struct MergeInfo {
    pub title: String,
    pub url: String,
    pub source_branch: String,
    pub target_branch: String,
    pub description: String,
}

/// Canonical output of the notification builder for merge events.
#[derive(Debug, Clone)]
pub struct MergeNotification {
    pub actor_username: String,
    pub actor_id: u64,
    pub project: String,
    pub merge_request: MergeInfo,
    pub reviewers: Vec<Participant>,
}

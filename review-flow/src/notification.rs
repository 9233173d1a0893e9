//! Builds notification records from validated webhook payloads.

use tracing::{debug, warn};

use gitlab_api::{GitLabClient, MrId};

use crate::triggers::TriggerKind;
use crate::types::*;

/// Outcome of the discussion-thread enrichment for `Response` notifications.
///
/// "Attempted but failed" is deliberately distinct from "not applicable":
/// both leave the notification without a `discussion` field, but a failure
/// has already been logged and may deserve operator attention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscussionEnrichment {
    Applied(DiscussionContext),
    NotApplicable,
    Failed,
}

impl DiscussionEnrichment {
    pub fn into_context(self) -> Option<DiscussionContext> {
        match self {
            DiscussionEnrichment::Applied(ctx) => Some(ctx),
            DiscussionEnrichment::NotApplicable | DiscussionEnrichment::Failed => None,
        }
    }
}

/// Transforms validated payloads into notification records, enriching
/// `Response` notifications via the GitLab client.
pub struct NotificationBuilder<'a> {
    gitlab: &'a GitLabClient,
}

impl<'a> NotificationBuilder<'a> {
    pub fn new(gitlab: &'a GitLabClient) -> Self {
        Self { gitlab }
    }

    /// Builds the review notification for a note event.
    ///
    /// Precondition: `mr` is the hook's actionable merge-request block
    /// (callers validate via [`NoteHook::actionable_merge_request`]).
    pub async fn build_review_notification(
        &self,
        kind: TriggerKind,
        hook: &NoteHook,
        mr: &MergeRequestSummary,
    ) -> ReviewNotification {
        let enrichment = self.enrich_discussion(kind, hook, mr).await;

        ReviewNotification {
            kind,
            actor_id: hook.user.id,
            actor_name: hook.user.name.clone(),
            project: hook.project.name.clone(),
            merge_request: MergeRequestInfo {
                title: mr.title.clone(),
                url: mr.url.clone(),
                author_id: mr.author_id,
                author: resolve_author_name(mr),
                source_branch: mr.source_branch.clone(),
                target_branch: mr.target_branch.clone(),
                state: mr.state.clone(),
            },
            note: hook.object_attributes.note.clone(),
            note_url: hook.object_attributes.url.clone(),
            discussion: enrichment.into_context(),
        }
    }

    /// Best-effort discussion lookup. Only `Response` notes with a
    /// discussion id are applicable; a failed fetch is logged and swallowed
    /// so the notification still goes out.
    async fn enrich_discussion(
        &self,
        kind: TriggerKind,
        hook: &NoteHook,
        mr: &MergeRequestSummary,
    ) -> DiscussionEnrichment {
        if kind != TriggerKind::Response {
            return DiscussionEnrichment::NotApplicable;
        }
        let Some(discussion_id) = hook.object_attributes.discussion_id.as_deref() else {
            return DiscussionEnrichment::NotApplicable;
        };

        let id = MrId {
            project: hook.project.id.to_string(),
            iid: mr.iid,
        };
        match self.gitlab.get_discussion(&id, discussion_id).await {
            Ok(discussion) => {
                let Some(first) = discussion.notes.first() else {
                    warn!(discussion_id, "discussion thread empty");
                    return DiscussionEnrichment::Failed;
                };
                let last = discussion.notes.last().unwrap_or(first);
                debug!(
                    discussion_id,
                    original_author = %first.author.name,
                    "discussion context attached"
                );
                DiscussionEnrichment::Applied(DiscussionContext {
                    id: discussion.id,
                    original_author: Participant {
                        id: first.author.id,
                        name: first.author.name.clone(),
                    },
                    last_reply_author: Participant {
                        id: last.author.id,
                        name: last.author.name.clone(),
                    },
                })
            }
            Err(e) => {
                warn!(
                    project = %id.project,
                    iid = id.iid,
                    discussion_id,
                    error = %e,
                    "discussion fetch failed; sending notification without thread context"
                );
                DiscussionEnrichment::Failed
            }
        }
    }
}

/// MR author record, then last-commit author, then "Unknown".
///
/// Payload shapes vary across event sub-types; the chain must stay exactly
/// in this order.
pub fn resolve_author_name(mr: &MergeRequestSummary) -> String {
    if let Some(author) = &mr.author {
        return author.name.clone();
    }
    if let Some(name) = mr
        .last_commit
        .as_ref()
        .and_then(|c| c.author.as_ref())
        .map(|a| a.name.clone())
    {
        return name;
    }
    "Unknown".to_string()
}

/// Builds the merge notification for a merge request event, or `None` for
/// every action other than `"merge"`.
pub fn build_merge_notification(hook: &MergeRequestHook) -> Option<MergeNotification> {
    if hook.object_attributes.action != "merge" {
        return None;
    }

    Some(MergeNotification {
        actor_username: hook.user.username.clone(),
        actor_id: hook.user.id,
        project: hook.project.path_with_namespace.clone(),
        merge_request: MergeInfo {
            title: hook.object_attributes.title.clone(),
            url: hook.object_attributes.url.clone(),
            source_branch: hook.object_attributes.source_branch.clone(),
            target_branch: hook.object_attributes.target_branch.clone(),
            description: hook.object_attributes.description.clone(),
        },
        reviewers: hook
            .reviewers
            .iter()
            .map(|r| Participant {
                id: r.id,
                name: r.name.clone(),
            })
            .collect(),
    })
}

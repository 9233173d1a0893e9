//! Webhook dispatch: the single entry point the HTTP layer calls.

use serde_json::Value;
use tracing::{debug, info, warn};

use ai_review::AiReviewOrchestrator;
use gitlab_api::{GitLabClient, MrId};
use slack_notify::SlackClient;

use crate::errors::{FlowError, FlowResult};
use crate::mention::MentionTable;
use crate::message::{create_merge_message, create_review_message};
use crate::notification::{NotificationBuilder, build_merge_notification};
use crate::triggers::{TriggerKind, classify};
use crate::types::{MergeRequestHook, NoteHook, WebhookEvent};

/// What the dispatcher did with one webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A team notification was posted for this trigger kind.
    NotificationSent { kind: TriggerKind },
    /// The AI review ran and its comment was posted to the MR.
    AiReviewCompleted,
    /// A merge notification was posted.
    MergeNotified,
    /// Recognized event type, but nothing to do for this payload.
    Skipped { reason: &'static str },
    /// Event type this service does not handle.
    Ignored { event_type: String },
}

/// Routes validated webhook deliveries to the notification or review path.
pub struct WebhookDispatcher {
    secret: String,
    gitlab: GitLabClient,
    slack: SlackClient,
    mentions: MentionTable,
    reviewer: AiReviewOrchestrator,
}

impl WebhookDispatcher {
    pub fn new(
        secret: impl Into<String>,
        gitlab: GitLabClient,
        slack: SlackClient,
        mentions: MentionTable,
        reviewer: AiReviewOrchestrator,
    ) -> Self {
        Self {
            secret: secret.into(),
            gitlab,
            slack,
            mentions,
            reviewer,
        }
    }

    /// Handles one delivery. The shared secret is checked before the payload
    /// is touched; an unknown event type is acknowledged, not rejected.
    pub async fn handle(
        &self,
        token: Option<&str>,
        event_type: &str,
        payload: Value,
    ) -> FlowResult<DispatchOutcome> {
        if token != Some(self.secret.as_str()) {
            warn!(event_type, "webhook secret mismatch");
            return Err(FlowError::Unauthorized);
        }

        match WebhookEvent::parse(event_type, payload)? {
            WebhookEvent::Note(hook) => self.process_note(hook).await,
            WebhookEvent::MergeRequest(hook) => self.process_merge(hook).await,
            WebhookEvent::Unknown(event_type) => {
                debug!(event_type, "unhandled event type");
                Ok(DispatchOutcome::Ignored { event_type })
            }
        }
    }

    async fn process_note(&self, hook: NoteHook) -> FlowResult<DispatchOutcome> {
        let Some(mr) = hook.actionable_merge_request() else {
            return Ok(DispatchOutcome::Skipped {
                reason: "note is not on a merge request",
            });
        };

        let Some(kind) = classify(&hook.object_attributes.note) else {
            return Ok(DispatchOutcome::Skipped {
                reason: "no trigger phrase in note",
            });
        };

        info!(
            trigger = %kind,
            project = %hook.project.name,
            mr_iid = mr.iid,
            actor = %hook.user.username,
            "review trigger received"
        );

        if kind == TriggerKind::AiReview {
            let id = MrId {
                project: hook.project.id.to_string(),
                iid: mr.iid,
            };
            self.reviewer
                .process_review_request(&id, &hook.object_attributes.note)
                .await?;
            return Ok(DispatchOutcome::AiReviewCompleted);
        }

        let notification = NotificationBuilder::new(&self.gitlab)
            .build_review_notification(kind, &hook, mr)
            .await;
        let message = create_review_message(&notification, &self.mentions);
        self.slack.post_message(&message).await?;

        Ok(DispatchOutcome::NotificationSent { kind })
    }

    async fn process_merge(&self, hook: MergeRequestHook) -> FlowResult<DispatchOutcome> {
        let Some(notification) = build_merge_notification(&hook) else {
            return Ok(DispatchOutcome::Skipped {
                reason: "merge request action is not a merge",
            });
        };

        info!(
            project = %notification.project,
            mr_iid = hook.object_attributes.iid,
            actor = %notification.actor_username,
            "merge completed"
        );

        let message = create_merge_message(&notification, &self.mentions);
        self.slack.post_message(&message).await?;

        Ok(DispatchOutcome::MergeNotified)
    }
}

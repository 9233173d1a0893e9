use serde::Serialize;

use review_flow::DispatchOutcome;

/// Body of a successful webhook acknowledgement.
#[derive(Serialize)]
pub struct WebhookResponse {
    /// What the dispatcher did: "notification_sent", "ai_review_completed",
    /// "merge_notified", "skipped" or "ignored".
    pub result: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<DispatchOutcome> for WebhookResponse {
    fn from(outcome: DispatchOutcome) -> Self {
        match outcome {
            DispatchOutcome::NotificationSent { kind } => Self {
                result: "notification_sent",
                detail: Some(kind.to_string()),
            },
            DispatchOutcome::AiReviewCompleted => Self {
                result: "ai_review_completed",
                detail: None,
            },
            DispatchOutcome::MergeNotified => Self {
                result: "merge_notified",
                detail: None,
            },
            DispatchOutcome::Skipped { reason } => Self {
                result: "skipped",
                detail: Some(reason.to_string()),
            },
            DispatchOutcome::Ignored { event_type } => Self {
                result: "ignored",
                detail: Some(event_type),
            },
        }
    }
}

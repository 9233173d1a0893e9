use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppError,
    routes::webhook_gitlab::webhook_response::WebhookResponse,
};

/// HTTP endpoint GitLab delivers webhooks to.
///
/// The event type comes from `X-Gitlab-Event` and the shared secret from
/// `X-Gitlab-Token`; the dispatcher validates the secret before the payload
/// is inspected. Skipped and ignored deliveries are acknowledged with 200 so
/// GitLab does not retry them.
#[instrument(name = "webhook_gitlab_route", skip(state, headers, payload))]
pub async fn webhook_gitlab_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Response {
    let event_type = headers
        .get("x-gitlab-event")
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();
    let token = headers.get("x-gitlab-token").and_then(|h| h.to_str().ok());

    debug!(event_type, "webhook delivery received");

    match state.dispatcher.handle(token, event_type, payload).await {
        Ok(outcome) => ApiResponse::success(WebhookResponse::from(outcome))
            .into_response_with_status(StatusCode::OK),
        Err(err) => AppError::from(err).into_response(),
    }
}

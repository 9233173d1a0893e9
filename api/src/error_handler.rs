use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use review_flow::FlowError;

use crate::core::app_state::ConfigError;
use crate::core::http::response_envelope::ApiResponse;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("slack connectivity check failed")]
    SlackBoot(#[source] slack_notify::SlackError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // startup-only
            AppError::Config(_) | AppError::SlackBoot(_) => StatusCode::INTERNAL_SERVER_ERROR,

            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,

            // custom mapped
            AppError::Http { status, .. } => *status,

            // 5xx
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::SlackBoot(_) => "SLACK_BOOT_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Http { code, .. } => code,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        ApiResponse::<()>::error(self.error_code(), self.to_string())
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Maps pipeline failures to precise HTTP statuses & codes. The secret
/// mismatch is the caller's fault; everything downstream of a valid payload
/// is an upstream failure, so the webhook gets a 502 and GitLab retries.
impl From<FlowError> for AppError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::Unauthorized => AppError::Http {
                status: StatusCode::UNAUTHORIZED,
                code: "UNAUTHORIZED",
                message: "Invalid webhook secret.".into(),
            },
            FlowError::Payload(e) => AppError::Http {
                status: StatusCode::BAD_REQUEST,
                code: "BAD_PAYLOAD",
                message: format!("Malformed webhook payload: {e}"),
            },
            FlowError::GitLab(e) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "GITLAB_ERROR",
                message: format!("GitLab API call failed: {e}"),
            },
            FlowError::Slack(e) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "SLACK_ERROR",
                message: format!("Slack API call failed: {e}"),
            },
            FlowError::AiReview(e) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "AI_REVIEW_ERROR",
                message: format!("AI review failed: {e}"),
            },
        }
    }
}

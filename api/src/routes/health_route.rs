use axum::{http::StatusCode, response::Response};
use serde::Serialize;

use crate::core::http::response_envelope::ApiResponse;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Liveness probe. No downstream calls, always 200 while the process is up.
pub async fn health_route() -> Response {
    ApiResponse::success(HealthResponse { status: "ok" })
        .into_response_with_status(StatusCode::OK)
}

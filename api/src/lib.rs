//! HTTP surface: the webhook endpoint, the liveness probe and server boot.

use std::{env, sync::Arc};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::info;

pub mod core;
pub mod error_handler;
mod middleware_layer;
mod routes;

use crate::core::app_state::AppState;
use crate::error_handler::{AppError, AppResult};
use crate::middleware_layer::request_log::request_log;
use crate::routes::{
    health_route::health_route, webhook_gitlab::webhook_gitlab_route::webhook_gitlab_route,
};

pub async fn start() -> AppResult<()> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let state = Arc::new(AppState::from_env()?);

    // Fail boot on a bad Slack token rather than on the first webhook.
    let identity = state.slack.auth_test().await.map_err(AppError::SlackBoot)?;
    info!(bot = %identity.user_id, team = %identity.team, "slack connectivity verified");

    let app = Router::new()
        .route("/webhook/gitlab", post(webhook_gitlab_route))
        .route("/health", get(health_route))
        .layer(middleware::from_fn(request_log))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;
    info!(%host_url, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Resolves when Ctrl+C is received.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

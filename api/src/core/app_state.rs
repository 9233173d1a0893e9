//! Composition root: builds every client from environment variables and
//! wires the webhook dispatcher.

use std::env;
use std::sync::Arc;

use thiserror::Error;

use ai_review::anthropic::AnthropicClient;
use ai_review::config::{
    DEFAULT_ENDPOINT, DEFAULT_MAX_INPUT_TOKENS, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL,
};
use ai_review::{AiEngineConfig, AiReviewOrchestrator};
use gitlab_api::{GitLabClient, GitLabConfig};
use review_flow::{MentionTable, WebhookDispatcher};
use slack_notify::{SlackClient, SlackConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<WebhookDispatcher>,
    /// Kept next to the dispatcher so boot can run the `auth.test` check.
    pub slack: SlackClient,
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingEnv(name))
}

fn parse_usize(name: &'static str, default: usize) -> Result<usize, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            reason: format!("expected an integer, got {raw:?}"),
        }),
        Err(_) => Ok(default),
    }
}

impl AppState {
    /// Loads shared state from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let gitlab = GitLabClient::from_config(GitLabConfig {
            base_api: env::var("GITLAB_API_URL")
                .unwrap_or_else(|_| "https://gitlab.com/api/v4".into()),
            token: require("GITLAB_API_TOKEN")?,
            proxy_url: env::var("FIXIE_URL").ok(),
        })
        .map_err(|e| ConfigError::Invalid {
            name: "GITLAB_API_URL",
            reason: e.to_string(),
        })?;

        let slack = SlackClient::from_config(SlackConfig {
            bot_token: require("SLACK_BOT_TOKEN")?,
            signing_secret: env::var("SLACK_SIGNING_SECRET").unwrap_or_default(),
            channel_id: require("SLACK_CHANNEL_ID")?,
            api_base: None,
        })
        .map_err(|e| ConfigError::Invalid {
            name: "SLACK_BOT_TOKEN",
            reason: e.to_string(),
        })?;

        let engine = AnthropicClient::new(AiEngineConfig {
            api_key: require("ANTHROPIC_API_KEY")?,
            model: env::var("CLAUDE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            endpoint: env::var("ANTHROPIC_API_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.into()),
            max_input_tokens: parse_usize("AI_MAX_INPUT_TOKENS", DEFAULT_MAX_INPUT_TOKENS)?,
            max_output_tokens: parse_usize("AI_MAX_OUTPUT_TOKENS", DEFAULT_MAX_OUTPUT_TOKENS)?,
            timeout_secs: None,
        })
        .map_err(|e| ConfigError::Invalid {
            name: "ANTHROPIC_API_KEY",
            reason: e.to_string(),
        })?;

        let mentions = MentionTable::parse_spec(
            &env::var("SLACK_USER_MAP").unwrap_or_default(),
            &env::var("SLACK_DEFAULT_MENTION").unwrap_or_else(|_| "ds.jeon".into()),
        )
        .map_err(|reason| ConfigError::Invalid {
            name: "SLACK_USER_MAP",
            reason,
        })?;

        let reviewer = AiReviewOrchestrator::new(gitlab.clone(), engine);
        let dispatcher = WebhookDispatcher::new(
            require("GITLAB_WEBHOOK_SECRET")?,
            gitlab,
            slack.clone(),
            mentions,
            reviewer,
        );

        Ok(Self {
            dispatcher: Arc::new(dispatcher),
            slack,
        })
    }
}

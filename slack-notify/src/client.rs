//! Slack Web API client (`auth.test`, `chat.postMessage`).

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::{debug, info};

use crate::blocks::SlackMessage;
use crate::errors::{SlackError, SlackResult};

const DEFAULT_API_BASE: &str = "https://slack.com/api";

/// Runtime configuration for [`SlackClient::from_config`].
#[derive(Debug, Clone)]
pub struct SlackConfig {
    pub bot_token: String,
    /// Accepted for config-surface parity; inbound Slack requests are not
    /// received by this service, so it is never checked against anything.
    pub signing_secret: String,
    /// The single channel all notifications go to.
    pub channel_id: String,
    /// API base override, for tests.
    pub api_base: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    api_base: String,
    channel_id: String,
}

impl SlackClient {
    pub fn from_config(cfg: SlackConfig) -> SlackResult<Self> {
        if cfg.bot_token.trim().is_empty() {
            return Err(SlackError::Config("bot token is empty".into()));
        }
        if cfg.channel_id.trim().is_empty() {
            return Err(SlackError::Config("channel id is empty".into()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", cfg.bot_token))
                .map_err(|e| SlackError::Config(format!("bad bot token: {e}")))?,
        );
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_base: cfg
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            channel_id: cfg.channel_id,
        })
    }

    /// Verifies the bot token at startup. Boot should abort on failure.
    pub async fn auth_test(&self) -> SlackResult<AuthInfo> {
        let url = format!("{}/auth.test", self.api_base);
        let resp: AuthTestResponse = self.http.post(&url).send().await?.json().await?;
        if !resp.ok {
            return Err(SlackError::Api {
                method: "auth.test",
                error: resp.error.unwrap_or_else(|| "unknown".into()),
            });
        }
        let info = AuthInfo {
            user_id: resp.user_id.unwrap_or_default(),
            team: resp.team.unwrap_or_default(),
        };
        info!(user_id = %info.user_id, team = %info.team, "slack bot authenticated");
        Ok(info)
    }

    /// Posts one message to the configured channel.
    pub async fn post_message(&self, message: &SlackMessage) -> SlackResult<MessageReceipt> {
        let url = format!("{}/chat.postMessage", self.api_base);
        let body = serde_json::json!({
            "channel": self.channel_id,
            "text": message.text,
            "blocks": message.blocks,
        });

        let resp: PostMessageResponse = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if !resp.ok {
            return Err(SlackError::Api {
                method: "chat.postMessage",
                error: resp.error.unwrap_or_else(|| "unknown".into()),
            });
        }

        debug!(channel = %self.channel_id, ts = ?resp.ts, "slack message sent");
        Ok(MessageReceipt {
            ts: resp.ts.unwrap_or_default(),
        })
    }
}

/// Identity confirmed by `auth.test`.
#[derive(Debug, Clone)]
pub struct AuthInfo {
    pub user_id: String,
    pub team: String,
}

/// Server-assigned timestamp of a posted message.
#[derive(Debug, Clone)]
pub struct MessageReceipt {
    pub ts: String,
}

#[derive(Debug, Deserialize)]
struct AuthTestResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    team: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    ts: Option<String>,
}

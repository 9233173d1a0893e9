//! Anthropic messages client.
//!
//! Minimal, non-streaming client around the REST API:
//! - POST {endpoint}/v1/messages
//!
//! Constructor validation:
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//! - token budget must leave room for the output window
//!
//! Errors are normalized via the unified types in `errors`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::AiEngineConfig;
use crate::errors::{AiResult, AiReviewError};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const TEMPERATURE: f32 = 0.3;

/// Thin client for the Anthropic messages API.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    cfg: AiEngineConfig,
    url_messages: String,
}

impl AnthropicClient {
    /// Creates a new client from the given config.
    ///
    /// Builds an HTTP client with default headers (`x-api-key`,
    /// `anthropic-version`) and a configurable timeout.
    pub fn new(cfg: AiEngineConfig) -> AiResult<Self> {
        cfg.validate()?;

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(120));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "x-api-key",
            header::HeaderValue::from_str(&cfg.api_key)
                .map_err(|_| crate::errors::ConfigError::MissingSetting("api_key"))?,
        );
        headers.insert(
            "anthropic-version",
            header::HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let url_messages = format!("{}/v1/messages", cfg.endpoint.trim_end_matches('/'));

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            max_output_tokens = cfg.max_output_tokens,
            "AnthropicClient initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_messages,
        })
    }

    pub fn model(&self) -> &str {
        &self.cfg.model
    }

    pub fn config(&self) -> &AiEngineConfig {
        &self.cfg
    }

    /// Performs one non-streaming messages request and returns the text of
    /// the first text content block.
    pub async fn generate(&self, system: &str, user: &str) -> AiResult<String> {
        let started = Instant::now();
        let body = MessagesRequest {
            model: &self.cfg.model,
            system,
            messages: vec![Message {
                role: "user",
                content: user,
            }],
            temperature: TEMPERATURE,
            max_tokens: self.cfg.max_output_tokens,
        };

        debug!(
            model = %self.cfg.model,
            user_len = user.len(),
            "POST {}", self.url_messages
        );

        let resp = self
            .client
            .post(&self.url_messages)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let snippet = snippet_of(&resp.text().await.unwrap_or_default());
            return Err(AiReviewError::HttpStatus {
                status: status.as_u16(),
                snippet,
            });
        }

        let decoded: MessagesResponse = resp.json().await?;
        let text = decoded
            .content
            .into_iter()
            .find_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .ok_or(AiReviewError::EmptyContent)?;

        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            response_len = text.len(),
            "anthropic generation complete"
        );

        Ok(text)
    }
}

fn snippet_of(body: &str) -> String {
    let mut s: String = body.chars().take(200).collect();
    if s.len() < body.len() {
        s.push('…');
    }
    s
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    system: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: usize,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

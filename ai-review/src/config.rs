//! Engine configuration for the Anthropic client.

use crate::errors::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
pub const DEFAULT_MAX_INPUT_TOKENS: usize = 100_000;
pub const DEFAULT_MAX_OUTPUT_TOKENS: usize = 4_000;

/// Configuration for the AI engine.
///
/// Filled by the composition root from environment variables; this crate
/// only validates it.
#[derive(Debug, Clone)]
pub struct AiEngineConfig {
    pub api_key: String,
    pub model: String,
    /// API base, e.g. "https://api.anthropic.com".
    pub endpoint: String,
    /// Admission ceiling for the whole request (system + user + overhead).
    pub max_input_tokens: usize,
    /// `max_tokens` sent with the generation request.
    pub max_output_tokens: usize,
    pub timeout_secs: Option<u64>,
}

impl AiEngineConfig {
    /// Minimal config with production defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_input_tokens: DEFAULT_MAX_INPUT_TOKENS,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            timeout_secs: None,
        }
    }

    /// Validates key presence, endpoint scheme and token budget coherence.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingSetting("api_key"));
        }
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
        }
        if self.max_input_tokens <= self.max_output_tokens {
            return Err(ConfigError::InvalidTokenBudget {
                input: self.max_input_tokens,
                output: self.max_output_tokens,
            });
        }
        Ok(())
    }

    /// Input budget left for the prompt after reserving the output window.
    pub fn prompt_budget(&self) -> usize {
        self.max_input_tokens - self.max_output_tokens
    }
}

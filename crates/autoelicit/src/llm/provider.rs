//! LLM client trait and configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Output format requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// A single JSON object and nothing else.
    #[default]
    Json,
    /// Free text.
    Text,
}

/// Configuration shared by every backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier (e.g., "gpt-3.5-turbo", "llama3.1:8b").
    pub model: String,

    /// Sampling temperature; lower values give more repeatable priors.
    pub temperature: f64,

    /// Maximum tokens in response.
    pub max_tokens: usize,

    /// Requested response format.
    pub response_format: ResponseFormat,

    /// Seed forwarded to backends that support it, and used for retry jitter.
    pub seed: Option<u64>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.1,
            // Thirty features of nested JSON run to roughly 1.5k tokens.
            max_tokens: 4096,
            response_format: ResponseFormat::Json,
            seed: Some(42),
            timeout_secs: 120,
        }
    }
}

impl LlmConfig {
    /// Same configuration with a different model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }

    pub fn wants_json(&self) -> bool {
        self.response_format == ResponseFormat::Json
    }
}

/// One fully composed prompt: a system message and a user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
}

impl ChatRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Trait for LLM backends.
///
/// Implementations must be thread-safe (Send + Sync) so a client can be
/// shared behind an `Arc`, even though elicitation itself is sequential.
pub trait LlmClient: Send + Sync {
    /// Send one prompt and return the raw text of the reply.
    ///
    /// Network, HTTP status, and quota failures are reported as
    /// [`ElicitError::Provider`](crate::ElicitError::Provider).
    fn complete(&self, request: &ChatRequest) -> Result<String>;

    /// Get the configuration for this client.
    fn config(&self) -> &LlmConfig;

    /// Get the name of this backend (for logging/debugging).
    fn name(&self) -> &str;
}

impl<T: LlmClient + ?Sized> LlmClient for Box<T> {
    fn complete(&self, request: &ChatRequest) -> Result<String> {
        (**self).complete(request)
    }

    fn config(&self) -> &LlmConfig {
        (**self).config()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_partial_toml() {
        let config: LlmConfig = toml::from_str("model = \"qwen2.5:7b\"\nseed = 7").unwrap();
        assert_eq!(config.model, "qwen2.5:7b");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.temperature, 0.1);
        assert!(config.wants_json());
    }

    #[test]
    fn test_response_format_names() {
        let config: LlmConfig = toml::from_str("response_format = \"text\"").unwrap();
        assert_eq!(config.response_format, ResponseFormat::Text);
    }
}

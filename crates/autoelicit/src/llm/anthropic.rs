//! Anthropic messages API client.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{ElicitError, Result};

use super::http;
use super::provider::{ChatRequest, LlmClient, LlmConfig};

/// Anthropic API endpoint.
const API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Anthropic API version.
const API_VERSION: &str = "2023-06-01";

const NAME: &str = "anthropic";

/// Assistant prefill that forces the reply to start as a JSON object.
const JSON_PREFILL: &str = "{";

/// Anthropic Claude client.
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    config: LlmConfig,
}

impl AnthropicClient {
    pub fn new(api_key: impl Into<String>, config: LlmConfig) -> Result<Self> {
        let client = http::build_client(NAME, config.timeout_secs)?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
        })
    }

    /// Create from the `ANTHROPIC_API_KEY` environment variable.
    pub fn from_env(config: LlmConfig) -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
            ElicitError::Config("ANTHROPIC_API_KEY environment variable not set".to_string())
        })?;
        Self::new(api_key, config)
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| ElicitError::Config(format!("Invalid API key: {}", e)))?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));
        Ok(headers)
    }

    /// JSON body for one message. The API has no JSON mode, so JSON output is
    /// requested by prefilling the assistant turn.
    fn request_body(&self, request: &ChatRequest) -> Value {
        let mut messages = vec![json!({ "role": "user", "content": request.user })];
        if self.config.wants_json() {
            messages.push(json!({ "role": "assistant", "content": JSON_PREFILL }));
        }

        json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "system": request.system,
            "messages": messages
        })
    }
}

impl LlmClient for AnthropicClient {
    fn complete(&self, request: &ChatRequest) -> Result<String> {
        debug!(model = %self.config.model, "sending message");

        let response = self
            .client
            .post(API_URL)
            .headers(self.build_headers()?)
            .json(&self.request_body(request))
            .send()
            .map_err(|e| http::transport_error(NAME, e))?;
        let response = http::check_status(NAME, response)?;

        let api_response: ApiResponse = response
            .json()
            .map_err(|e| {
                ElicitError::provider(NAME, format!("Failed to parse API response: {}", e), false)
            })?;

        let text = api_response
            .content
            .into_iter()
            .find_map(|block| (block.content_type == "text").then_some(block.text))
            .ok_or_else(|| ElicitError::provider(NAME, "No text in API response", true))?;

        // The prefill is not echoed back.
        if self.config.wants_json() {
            Ok(format!("{}{}", JSON_PREFILL, text))
        } else {
            Ok(text)
        }
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        NAME
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

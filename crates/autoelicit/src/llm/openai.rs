//! OpenAI chat completions client.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{ElicitError, Result};

use super::http;
use super::provider::{ChatRequest, LlmClient, LlmConfig};

/// OpenAI API base URL.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const NAME: &str = "openai";

/// Client for OpenAI (and OpenAI-compatible) chat completion APIs.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    config: LlmConfig,
}

impl OpenAiClient {
    /// Create a client with the given API key and default configuration.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, LlmConfig::default())
    }

    pub fn with_config(api_key: impl Into<String>, config: LlmConfig) -> Result<Self> {
        let client = http::build_client(NAME, config.timeout_secs)?;
        let base_url = std::env::var("OPENAI_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url,
            config,
        })
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env(config: LlmConfig) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            ElicitError::Config("OPENAI_API_KEY environment variable not set".to_string())
        })?;
        Self::with_config(api_key, config)
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|e| ElicitError::Config(format!("Invalid API key: {}", e)))?,
        );
        Ok(headers)
    }

    /// JSON body for one chat completion.
    fn request_body(&self, request: &ChatRequest) -> Value {
        let mut body = json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user }
            ]
        });
        if self.config.wants_json() {
            body["response_format"] = json!({ "type": "json_object" });
        }
        if let Some(seed) = self.config.seed {
            body["seed"] = json!(seed);
        }
        body
    }
}

impl LlmClient for OpenAiClient {
    fn complete(&self, request: &ChatRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(model = %self.config.model, %url, "sending chat completion");

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers()?)
            .json(&self.request_body(request))
            .send()
            .map_err(|e| http::transport_error(NAME, e))?;
        let response = http::check_status(NAME, response)?;

        let api_response: ChatCompletion = response
            .json()
            .map_err(|e| {
                ElicitError::provider(NAME, format!("Failed to parse API response: {}", e), false)
            })?;

        api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ElicitError::provider(NAME, "No response content from OpenAI", true))
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        NAME
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

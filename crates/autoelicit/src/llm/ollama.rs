//! Open-weight models served by a local Ollama instance.
//!
//! Ollama runs Llama, Qwen, DeepSeek and other open-weight models locally
//! without API keys. Install from: https://ollama.ai

use std::fmt;
use std::str::FromStr;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{ElicitError, Result};

use super::http;
use super::provider::{ChatRequest, LlmClient, LlmConfig};

/// Default Ollama API endpoint.
const DEFAULT_API_URL: &str = "http://localhost:11434/api/chat";

/// Open-weight model families with a default Ollama tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenWeightModel {
    Llama,
    Qwen,
    DeepSeek,
}

impl OpenWeightModel {
    /// Ollama tag pulled when no explicit model is configured.
    pub fn default_tag(self) -> &'static str {
        match self {
            OpenWeightModel::Llama => "llama3.1:8b",
            OpenWeightModel::Qwen => "qwen2.5:7b",
            OpenWeightModel::DeepSeek => "deepseek-r1:7b",
        }
    }

    /// Backend name used in logs and records.
    pub fn name(self) -> &'static str {
        match self {
            OpenWeightModel::Llama => "llama",
            OpenWeightModel::Qwen => "qwen",
            OpenWeightModel::DeepSeek => "deepseek",
        }
    }
}

impl FromStr for OpenWeightModel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "llama" => Ok(OpenWeightModel::Llama),
            "qwen" => Ok(OpenWeightModel::Qwen),
            "deepseek" => Ok(OpenWeightModel::DeepSeek),
            _ => Err(format!("Unknown open-weight model family: {}", s)),
        }
    }
}

impl fmt::Display for OpenWeightModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ollama chat client.
pub struct OllamaClient {
    client: Client,
    api_url: String,
    name: String,
    config: LlmConfig,
}

impl OllamaClient {
    /// Create a client for an arbitrary Ollama model.
    ///
    /// The endpoint honours `OLLAMA_HOST`.
    pub fn new(config: LlmConfig) -> Result<Self> {
        Self::named("ollama", config)
    }

    /// Create a client for a model family.
    ///
    /// `config.model` is replaced with the family's default tag unless it
    /// already names a model of that family.
    pub fn for_model(family: OpenWeightModel, mut config: LlmConfig) -> Result<Self> {
        if !config.model.to_lowercase().starts_with(family.name()) {
            config.model = family.default_tag().to_string();
        }
        Self::named(family.name(), config)
    }

    fn named(name: &str, config: LlmConfig) -> Result<Self> {
        let client = http::build_client(name, config.timeout_secs)?;
        let api_url = std::env::var("OLLAMA_HOST")
            .map(|host| format!("{}/api/chat", host.trim_end_matches('/')))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self {
            client,
            api_url,
            name: name.to_string(),
            config,
        })
    }

    fn request_body(&self, request: &ChatRequest) -> Value {
        let mut options = json!({
            "temperature": self.config.temperature,
            "num_predict": self.config.max_tokens
        });
        if let Some(seed) = self.config.seed {
            options["seed"] = json!(seed);
        }

        let mut body = json!({
            "model": self.config.model,
            "stream": false,
            "options": options,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user }
            ]
        });
        if self.config.wants_json() {
            body["format"] = json!("json");
        }
        body
    }
}

impl LlmClient for OllamaClient {
    fn complete(&self, request: &ChatRequest) -> Result<String> {
        debug!(model = %self.config.model, url = %self.api_url, "sending chat request");

        let response = self
            .client
            .post(&self.api_url)
            .json(&self.request_body(request))
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    ElicitError::provider(
                        &self.name,
                        "Failed to connect to Ollama. Is it running? Start with: ollama serve",
                        false,
                    )
                } else {
                    http::transport_error(&self.name, e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().unwrap_or_default();
            if error_text.contains("not found") {
                return Err(ElicitError::provider(
                    &self.name,
                    format!(
                        "Model '{}' not found. Pull it with: ollama pull {}",
                        self.config.model, self.config.model
                    ),
                    false,
                ));
            }
            return Err(ElicitError::provider(
                &self.name,
                format!("Ollama error ({}): {}", status, error_text),
                http::is_retryable_status(status),
            ));
        }

        let api_response: OllamaResponse = response.json().map_err(|e| {
            let message = format!("Failed to parse Ollama response: {}", e);
            ElicitError::provider(&self.name, message, false)
        })?;

        Ok(api_response.message.content)
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}

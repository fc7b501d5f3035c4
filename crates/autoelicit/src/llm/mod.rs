//! LLM backends that answer elicitation prompts.
//!
//! # Supported Providers
//!
//! - **OpenAI** - GPT models via API (requires `OPENAI_API_KEY`)
//! - **Anthropic** - Claude models via API (requires `ANTHROPIC_API_KEY`)
//! - **Llama / Qwen / DeepSeek** - open-weight models through Ollama, no API key
//! - **Mock** - deterministic offline replies
//!
//! # Example
//!
//! ```no_run
//! use autoelicit::llm::{build_client, LlmConfig, ProviderKind};
//!
//! let config = LlmConfig::default().with_model("gpt-3.5-turbo").with_temperature(0.1);
//! let client = build_client(ProviderKind::OpenAi, config, &[]).unwrap();
//! ```

mod anthropic;
mod http;
mod mock;
mod ollama;
mod openai;
mod provider;
mod retry;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use anthropic::AnthropicClient;
pub use mock::{priors_json, MockClient, MockReply};
pub use ollama::{OllamaClient, OpenWeightModel};
pub use openai::OpenAiClient;
pub use provider::{ChatRequest, LlmClient, LlmConfig, ResponseFormat};
pub use retry::{Backoff, RetryPolicy};

/// Which backend to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI chat completions.
    #[default]
    OpenAi,
    /// Anthropic messages.
    Anthropic,
    /// Any model served by Ollama.
    Ollama,
    /// Llama family through Ollama.
    Llama,
    /// Qwen family through Ollama.
    Qwen,
    /// DeepSeek family through Ollama.
    DeepSeek,
    /// Offline mock with seeded priors.
    Mock,
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" | "gpt" => Ok(ProviderKind::OpenAi),
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            "ollama" | "local" => Ok(ProviderKind::Ollama),
            "llama" => Ok(ProviderKind::Llama),
            "qwen" => Ok(ProviderKind::Qwen),
            "deepseek" => Ok(ProviderKind::DeepSeek),
            "mock" | "test" => Ok(ProviderKind::Mock),
            _ => Err(format!(
                "Unknown provider: {}. Use: openai, anthropic, ollama, llama, qwen, deepseek, \
                 or mock.",
                s
            )),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Ollama => "ollama",
            ProviderKind::Llama => "llama",
            ProviderKind::Qwen => "qwen",
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::Mock => "mock",
        };
        f.write_str(name)
    }
}

/// Construct a client for `kind`.
///
/// `feature_names` is only used by the mock backend, which needs to know
/// which keys to answer with.
pub fn build_client(
    kind: ProviderKind,
    config: LlmConfig,
    feature_names: &[String],
) -> Result<Box<dyn LlmClient>> {
    let client: Box<dyn LlmClient> = match kind {
        ProviderKind::OpenAi => Box::new(OpenAiClient::from_env(config)?),
        ProviderKind::Anthropic => Box::new(AnthropicClient::from_env(config)?),
        ProviderKind::Ollama => Box::new(OllamaClient::new(config)?),
        ProviderKind::Llama => Box::new(OllamaClient::for_model(OpenWeightModel::Llama, config)?),
        ProviderKind::Qwen => Box::new(OllamaClient::for_model(OpenWeightModel::Qwen, config)?),
        ProviderKind::DeepSeek => {
            Box::new(OllamaClient::for_model(OpenWeightModel::DeepSeek, config)?)
        }
        ProviderKind::Mock => {
            let seed = config.seed.unwrap_or_default();
            Box::new(
                MockClient::with_feature_priors(feature_names.to_vec(), seed)
                    .with_config(config.with_model("mock")),
            )
        }
    };
    Ok(client)
}

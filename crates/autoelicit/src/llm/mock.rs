//! Mock LLM client for testing and offline runs.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::{json, Map, Value};

use crate::error::{ElicitError, Result};

use super::provider::{ChatRequest, LlmClient, LlmConfig};

type Responder = Box<dyn Fn(&ChatRequest, usize) -> Result<String> + Send + Sync>;

/// A canned reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text.
    Text(String),
    /// Fail as the backend would.
    Fail { message: String, retryable: bool },
}

enum Script {
    Queue(Mutex<VecDeque<MockReply>>),
    Responder(Responder),
}

/// Mock client that returns predictable responses and records every request.
pub struct MockClient {
    config: LlmConfig,
    script: Script,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockClient {
    /// Reply with each scripted text in order; fail once they run out.
    pub fn scripted<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_replies(replies.into_iter().map(|r| MockReply::Text(r.into())))
    }

    /// Like [`MockClient::scripted`], with failures mixed in.
    pub fn from_replies(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self {
            config: LlmConfig::default().with_model("mock"),
            script: Script::Queue(Mutex::new(replies.into_iter().collect())),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Compute each reply from the request and its zero-based call number.
    pub fn responder<F>(f: F) -> Self
    where
        F: Fn(&ChatRequest, usize) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            config: LlmConfig::default().with_model("mock"),
            script: Script::Responder(Box::new(f)),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request with well-formed priors for `feature_names`.
    ///
    /// Values are drawn from an RNG seeded with `seed`, so runs repeat.
    pub fn with_feature_priors(feature_names: Vec<String>, seed: u64) -> Self {
        let mut client = Self::responder(move |_, call| {
            let mut rng = fastrand::Rng::with_seed(seed.wrapping_add(call as u64));
            let names: Vec<&str> = feature_names.iter().map(|s| s.as_str()).collect();
            let priors: Vec<(f64, f64)> = names
                .iter()
                .map(|_| {
                    let mean = (rng.f64() * 2.0 - 1.0) * 1.5;
                    let std = 0.5 + rng.f64();
                    ((mean * 100.0).round() / 100.0, (std * 100.0).round() / 100.0)
                })
                .collect();
            Ok(priors_json(&names, &priors))
        });
        client.config.seed = Some(seed);
        client
    }

    pub fn with_config(mut self, config: LlmConfig) -> Self {
        self.config = config;
        self
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }
}

impl LlmClient for MockClient {
    fn complete(&self, request: &ChatRequest) -> Result<String> {
        let call = {
            let mut requests = self
                .requests
                .lock()
                .map_err(|_| ElicitError::provider("mock", "request log poisoned", false))?;
            requests.push(request.clone());
            requests.len() - 1
        };

        match &self.script {
            Script::Responder(f) => f(request, call),
            Script::Queue(queue) => {
                let reply = queue
                    .lock()
                    .map_err(|_| ElicitError::provider("mock", "reply queue poisoned", false))?
                    .pop_front();
                match reply {
                    Some(MockReply::Text(text)) => Ok(text),
                    Some(MockReply::Fail { message, retryable }) => {
                        Err(ElicitError::provider("mock", message, retryable))
                    }
                    None => Err(ElicitError::provider("mock", "no scripted replies left", false)),
                }
            }
        }
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Render `{name: {"mean": m, "std": s}}` for the given features.
pub fn priors_json(feature_names: &[&str], priors: &[(f64, f64)]) -> String {
    let map: Map<String, Value> = feature_names
        .iter()
        .zip(priors)
        .map(|(name, (mean, std))| (name.to_string(), json!({ "mean": mean, "std": std })))
        .collect();
    Value::Object(map).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_replies_in_order() {
        let client = MockClient::scripted(["one", "two"]);
        let req = ChatRequest::new("s", "u");

        assert_eq!(client.complete(&req).unwrap(), "one");
        assert_eq!(client.complete(&req).unwrap(), "two");
        assert!(client.complete(&req).is_err());
        assert_eq!(client.call_count(), 3);
    }

    #[test]
    fn test_scripted_failure() {
        let client = MockClient::from_replies([MockReply::Fail {
            message: "rate limited".to_string(),
            retryable: true,
        }]);
        let err = client.complete(&ChatRequest::new("s", "u")).unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_feature_priors_are_valid_and_repeatable() {
        let names = vec!["a".to_string(), "b".to_string()];
        let first = MockClient::with_feature_priors(names.clone(), 7);
        let second = MockClient::with_feature_priors(names, 7);
        let req = ChatRequest::new("s", "u");

        let text = first.complete(&req).unwrap();
        assert_eq!(text, second.complete(&req).unwrap());

        let value: Value = serde_json::from_str(&text).unwrap();
        assert!(value["a"]["mean"].is_number());
        assert!(value["b"]["std"].as_f64().unwrap() >= 0.5);
    }

    #[test]
    fn test_records_requests() {
        let client = MockClient::scripted(["{}"]);
        client.complete(&ChatRequest::new("sys", "usr")).unwrap();
        assert_eq!(client.requests(), vec![ChatRequest::new("sys", "usr")]);
    }
}

//! Sequential elicitation over every (system, user) prompt pair.

use std::thread;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ElicitError, Result};
use crate::llm::{Backoff, ChatRequest, LlmClient, RetryPolicy};
use crate::prompt::{PromptPair, PromptTemplate};

use super::parser::parse_priors;
use super::prior::{Prior, PriorArray};
use super::record::ElicitationRecord;

/// Default floor for elicited standard deviations.
pub const DEFAULT_STD_LOWER_CLIP: f64 = 1e-3;

/// Knobs for an elicitation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ElicitOptions {
    /// Retry policy for failed requests and unreadable replies.
    pub retry: RetryPolicy,
    /// Standard deviations below this are raised to it.
    pub std_lower_clip: f64,
    /// Log prompts and priors at info level instead of debug.
    pub verbose: bool,
}

impl Default for ElicitOptions {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            std_lower_clip: DEFAULT_STD_LOWER_CLIP,
            verbose: false,
        }
    }
}

/// Drives one client through every prompt pair, one request at a time.
pub struct Elicitor<'a> {
    client: &'a dyn LlmClient,
    options: ElicitOptions,
    backoff: Backoff,
}

impl<'a> Elicitor<'a> {
    pub fn new(client: &'a dyn LlmClient) -> Self {
        Self::with_options(client, ElicitOptions::default())
    }

    /// Retry jitter is seeded from the client's configured seed.
    pub fn with_options(client: &'a dyn LlmClient, options: ElicitOptions) -> Self {
        let backoff = Backoff::new(options.retry.clone(), client.config().seed);
        Self {
            client,
            options,
            backoff,
        }
    }

    pub fn options(&self) -> &ElicitOptions {
        &self.options
    }

    /// Elicit priors and return only the array.
    pub fn elicit(
        &mut self,
        system_roles: &[PromptTemplate],
        user_roles: &[PromptTemplate],
        feature_names: &[String],
    ) -> Result<PriorArray> {
        self.run(system_roles, user_roles, feature_names)
            .map(|record| record.priors)
    }

    /// Elicit priors and keep the prompts and settings that produced them.
    ///
    /// Any prompt pair that still fails after its retries aborts the run;
    /// no partial array is returned.
    pub fn run(
        &mut self,
        system_roles: &[PromptTemplate],
        user_roles: &[PromptTemplate],
        feature_names: &[String],
    ) -> Result<ElicitationRecord> {
        if system_roles.is_empty() {
            return Err(ElicitError::Config("at least one system role is required".to_string()));
        }
        if user_roles.is_empty() {
            return Err(ElicitError::Config("at least one user role is required".to_string()));
        }
        if feature_names.is_empty() {
            return Err(ElicitError::Config("at least one feature name is required".to_string()));
        }
        if self.options.retry.max_attempts == 0 {
            return Err(ElicitError::Config("max_attempts must be at least 1".to_string()));
        }

        let pairs = PromptPair::all(system_roles, user_roles, feature_names)?;
        let mut priors = PriorArray::new(feature_names.to_vec());
        let mut attempts = Vec::with_capacity(pairs.len());

        info!(
            provider = self.client.name(),
            model = %self.client.config().model,
            pairs = pairs.len(),
            features = feature_names.len(),
            "starting elicitation"
        );

        for pair in &pairs {
            self.log_prompt(pair);
            let (pair_priors, used) = self.elicit_pair(pair, feature_names)?;
            self.log_priors(pair, feature_names, &pair_priors);
            priors.push_pair(pair_priors)?;
            attempts.push(used);
        }

        let config = self.client.config();
        Ok(ElicitationRecord {
            provider: self.client.name().to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            seed: config.seed,
            created_at: Utc::now(),
            feature_names: feature_names.to_vec(),
            prompts: pairs,
            attempts,
            priors,
        })
    }

    /// One prompt pair, with retries. Returns the priors and attempts used.
    fn elicit_pair(
        &mut self,
        pair: &PromptPair,
        feature_names: &[String],
    ) -> Result<(Vec<Prior>, u32)> {
        let request = ChatRequest::new(pair.system.clone(), pair.user.clone());
        let max_attempts = self.options.retry.max_attempts;
        let clip = self.options.std_lower_clip;

        let mut attempt = 1;
        loop {
            let outcome = self
                .client
                .complete(&request)
                .and_then(|reply| parse_priors(&reply, feature_names, pair.index));

            match outcome {
                Ok(priors) => {
                    let clipped = priors.into_iter().map(|p| p.clip_std(clip)).collect();
                    return Ok((clipped, attempt));
                }
                Err(err) if err.is_retryable() && attempt < max_attempts => {
                    let delay = self.backoff.delay(attempt);
                    warn!(
                        pair = pair.index,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "elicitation attempt failed, retrying"
                    );
                    if !delay.is_zero() {
                        thread::sleep(delay);
                    }
                    attempt += 1;
                }
                Err(err) => {
                    warn!(pair = pair.index, attempt, error = %err, "elicitation failed");
                    return Err(err);
                }
            }
        }
    }

    fn log_prompt(&self, pair: &PromptPair) {
        if self.options.verbose {
            info!(pair = pair.index, system = %pair.system, user = %pair.user, "prompt");
        } else {
            debug!(pair = pair.index, system = %pair.system, user = %pair.user, "prompt");
        }
    }

    fn log_priors(&self, pair: &PromptPair, feature_names: &[String], priors: &[Prior]) {
        let summary: Vec<String> = feature_names
            .iter()
            .zip(priors)
            .map(|(name, p)| format!("{}: ({:.3}, {:.3})", name, p.mean, p.std))
            .collect();
        let summary = summary.join("; ");
        if self.options.verbose {
            info!(pair = pair.index, priors = %summary, "elicited priors");
        } else {
            debug!(pair = pair.index, priors = %summary, "elicited priors");
        }
    }
}

/// Elicit priors for every combination of system and user role.
///
/// Each user role has `{feature_names}` replaced with the comma-joined
/// feature names. The result has shape `(system_roles.len() *
/// user_roles.len(), feature_names.len(), 2)`.
pub fn elicit_priors_for_dataset<S, U>(
    client: &dyn LlmClient,
    system_roles: &[S],
    user_roles: &[U],
    feature_names: &[String],
    verbose: bool,
) -> Result<PriorArray>
where
    S: AsRef<str>,
    U: AsRef<str>,
{
    let systems: Vec<PromptTemplate> = system_roles
        .iter()
        .map(|s| PromptTemplate::new(s.as_ref()))
        .collect();
    let users: Vec<PromptTemplate> = user_roles
        .iter()
        .map(|u| PromptTemplate::new(u.as_ref()))
        .collect();
    let options = ElicitOptions {
        verbose,
        ..ElicitOptions::default()
    };
    Elicitor::with_options(client, options).elicit(&systems, &users, feature_names)
}

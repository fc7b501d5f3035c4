//! Retry policy with seeded, jittered exponential backoff.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How often and how patiently a failed prompt pair is retried.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts per prompt pair, the first one included.
    pub max_attempts: u32,
    /// Delay before the first retry, in milliseconds.
    pub base_delay_ms: u64,
    /// Upper bound on any single delay, in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 500,
            max_delay_ms: 30_000,
        }
    }
}

impl RetryPolicy {
    /// A single attempt, no retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Retries with no waiting in between.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay_ms: 0,
            max_delay_ms: 0,
        }
    }
}

/// Produces backoff delays. Jitter comes from a seeded RNG so that a run with
/// a fixed seed waits the same way every time.
pub struct Backoff {
    policy: RetryPolicy,
    rng: fastrand::Rng,
}

impl Backoff {
    pub fn new(policy: RetryPolicy, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self { policy, rng }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    ///
    /// Half of the exponential delay is fixed, the other half is jitter.
    pub fn delay(&mut self, attempt: u32) -> Duration {
        let exp = self
            .policy
            .base_delay_ms
            .saturating_mul(1u64 << attempt.saturating_sub(1).min(20))
            .min(self.policy.max_delay_ms);
        let half = exp / 2;
        let jitter = if half == 0 { 0 } else { self.rng.u64(0..=half) };
        Duration::from_millis(exp - half + jitter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delays_grow_and_stay_bounded() {
        let policy = RetryPolicy {
            max_attempts: 10,
            base_delay_ms: 100,
            max_delay_ms: 1_000,
        };
        let mut backoff = Backoff::new(policy, Some(42));

        let first = backoff.delay(1);
        assert!(first >= Duration::from_millis(50) && first <= Duration::from_millis(100));

        let third = backoff.delay(3);
        assert!(third >= Duration::from_millis(200) && third <= Duration::from_millis(400));

        for attempt in 1..40 {
            assert!(backoff.delay(attempt) <= Duration::from_millis(1_000));
        }
    }

    #[test]
    fn test_same_seed_same_delays() {
        let mut a = Backoff::new(RetryPolicy::default(), Some(9));
        let mut b = Backoff::new(RetryPolicy::default(), Some(9));
        for attempt in 1..6 {
            assert_eq!(a.delay(attempt), b.delay(attempt));
        }
    }

    #[test]
    fn test_immediate_policy_never_waits() {
        let mut backoff = Backoff::new(RetryPolicy::immediate(5), None);
        assert_eq!(backoff.delay(4), Duration::ZERO);
    }
}

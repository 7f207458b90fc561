use std::time::Duration;

use crate::errors::ScrapeError;

/// Bounded retry with exponential backoff
///
/// `max_attempts` counts the first try, so the default of one attempt means
/// no retry at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
}

const DEFAULT_BACKOFF_MS: u64 = 1000;
const MAX_BACKOFF_SECS: u64 = 60;

impl RetryPolicy {
    pub fn none() -> Self {
        Self::new(0, DEFAULT_BACKOFF_MS)
    }

    /// `retries` extra attempts after the first one
    pub fn new(retries: u32, backoff_ms: u64) -> Self {
        Self {
            max_attempts: retries.saturating_add(1),
            initial_backoff: Duration::from_millis(backoff_ms),
            max_backoff: Duration::from_secs(MAX_BACKOFF_SECS),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Whether another attempt follows failed attempt number `attempt` (1-based)
    pub fn should_retry(&self, error: &ScrapeError, attempt: u32) -> bool {
        error.is_retryable() && attempt < self.max_attempts
    }

    /// Delay before the attempt following failed attempt number `attempt`
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

//! Client configuration types.

use dangling_core::DanglingError;
use std::time::Duration;

/// Retry configuration for failed requests
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,

    /// Initial backoff duration
    pub initial_backoff: Duration,

    /// Maximum backoff duration
    pub max_backoff: Duration,

    /// Whether to retry on rate limit errors
    pub retry_on_rate_limit: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryConfig {
    /// Create a new retry configuration
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
            retry_on_rate_limit: true,
        }
    }

    /// Configuration that never retries
    #[must_use]
    pub const fn none() -> Self {
        Self::new().max_retries(0)
    }

    /// Set maximum retries
    #[must_use]
    pub const fn max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    /// Set initial backoff duration
    #[must_use]
    pub const fn initial_backoff(mut self, duration: Duration) -> Self {
        self.initial_backoff = duration;
        self
    }

    /// Set maximum backoff duration
    #[must_use]
    pub const fn max_backoff(mut self, duration: Duration) -> Self {
        self.max_backoff = duration;
        self
    }

    /// Set whether rate limit responses are retried
    #[must_use]
    pub const fn retry_on_rate_limit(mut self, retry: bool) -> Self {
        self.retry_on_rate_limit = retry;
        self
    }

    /// Calculate backoff for a given attempt (0-based), capped at `max_backoff`
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let initial = u64::try_from(self.initial_backoff.as_millis()).unwrap_or(u64::MAX);
        let max = u64::try_from(self.max_backoff.as_millis()).unwrap_or(u64::MAX);
        let factor = 2u64.checked_pow(attempt).unwrap_or(u64::MAX);
        Duration::from_millis(initial.saturating_mul(factor).min(max))
    }

    /// Whether `error` on attempt `attempt` (0-based) should be retried
    #[must_use]
    pub const fn should_retry(&self, error: &DanglingError, attempt: u32) -> bool {
        if attempt >= self.max_retries || !error.is_retryable() {
            return false;
        }
        self.retry_on_rate_limit || !matches!(error, DanglingError::RateLimited { .. })
    }
}

/// Client-side request rate limit, shared by every call made through a client
#[derive(Debug, Clone, Copy)]
pub struct RateLimit {
    /// Sustained requests per second
    pub requests_per_second: u32,

    /// Requests allowed in a burst
    pub burst: u32,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            requests_per_second: 5,
            burst: 5,
        }
    }
}

impl RateLimit {
    /// Create a rate limit with an equal burst size
    #[must_use]
    pub const fn per_second(requests_per_second: u32) -> Self {
        Self {
            requests_per_second,
            burst: requests_per_second,
        }
    }
}

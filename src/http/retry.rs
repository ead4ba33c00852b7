//! Opt-in retry policy
//!
//! A page fetch or cart mutation is sent once unless `http.max_retries` is
//! set. The feed and cart never retry on their own; this is purely a
//! transport setting.

use crate::error::Error;
use crate::types::BackoffType;
use std::time::Duration;

/// How a failed request is re-sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first; 0 sends each request once
    pub max_retries: u32,
    /// Growth of the delay between attempts
    pub backoff: BackoffType,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound for any delay, including a server's `Retry-After`
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

impl RetryPolicy {
    /// Send every request exactly once
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: BackoffType::Exponential,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
        }
    }

    /// Retry up to `max_retries` times
    pub fn new(
        max_retries: u32,
        backoff: BackoffType,
        initial_delay: Duration,
        max_delay: Duration,
    ) -> Self {
        Self {
            max_retries,
            backoff,
            initial_delay,
            max_delay,
        }
    }

    /// Backoff before retry number `retry` (0-based), capped at `max_delay`
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        let delay = match self.backoff {
            BackoffType::Constant => self.initial_delay,
            BackoffType::Linear => self.initial_delay.saturating_mul(retry.saturating_add(1)),
            BackoffType::Exponential => self
                .initial_delay
                .saturating_mul(2u32.saturating_pow(retry)),
        };
        delay.min(self.max_delay)
    }

    /// Delay before re-sending after `err` failed attempt number `attempt`
    /// (0-based), or `None` when the error is final.
    pub fn delay_after(&self, err: &Error, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_retries || !err.is_retryable() {
            return None;
        }
        match err {
            Error::RateLimited {
                retry_after_seconds,
            } => Some(Duration::from_secs(*retry_after_seconds).min(self.max_delay)),
            _ => Some(self.backoff_delay(attempt)),
        }
    }
}

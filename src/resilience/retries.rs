//! Retry decisions.
//!
//! A failed attempt is retried only when it is transient (no response, or
//! status >= 500) and the call still has retries left. Cancellation and
//! 4xx responses are never retried.

use std::time::Duration;

use crate::config::RetryConfig;
use crate::http::ErrorKind;

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    NoRetry,
    RetryAfter(Duration),
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub fn max_retries(&self) -> u32 {
        self.config.max_retries
    }

    /// `retry_count` is the number of retries already performed for the call.
    pub fn decide(&self, retry_count: u32, kind: ErrorKind) -> RetryDecision {
        if !kind.is_transient() || retry_count >= self.config.max_retries {
            return RetryDecision::NoRetry;
        }
        RetryDecision::RetryAfter(self.config.delay_before(retry_count + 1))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}

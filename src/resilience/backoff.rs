//! Delay between attempts.

use std::time::Duration;

use rand::Rng;

use crate::config::{BackoffStrategy, RetryConfig};

impl RetryConfig {
    /// Delay before retry number `retry` (1-based).
    pub fn delay_before(&self, retry: u32) -> Duration {
        match self.strategy {
            BackoffStrategy::Fixed => Duration::from_millis(self.delay_ms),
            BackoffStrategy::Exponential => with_jitter(self.doubled_delay_ms(retry)),
        }
    }

    /// `delay_ms` doubled for every retry after the first, capped at `max_delay_ms`.
    fn doubled_delay_ms(&self, retry: u32) -> u64 {
        let factor = 1u64
            .checked_shl(retry.saturating_sub(1))
            .unwrap_or(u64::MAX);
        self.delay_ms.saturating_mul(factor).min(self.max_delay_ms)
    }
}

/// Add up to 10% random jitter.
fn with_jitter(delay_ms: u64) -> Duration {
    let jitter = match delay_ms / 10 {
        0 => 0,
        span => rand::thread_rng().gen_range(0..span),
    };
    Duration::from_millis(delay_ms + jitter)
}

//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the event portal client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend endpoint and per-attempt transport settings.
    pub api: ApiConfig,

    /// Retry configuration.
    pub retries: RetryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is resolved against
    /// (e.g., "http://localhost:8080/api").
    pub base_url: String,

    /// Timeout for a single attempt in milliseconds. Retries get a fresh window.
    pub timeout_ms: u64,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_ms: 15_000,
            user_agent: concat!("event-portal-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Delay strategy between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackoffStrategy {
    /// Same delay before every retry.
    #[default]
    Fixed,
    /// Doubling delay with jitter, capped at `max_delay_ms`.
    Exponential,
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,

    /// Delay before a retry in milliseconds (base delay for exponential).
    pub delay_ms: u64,

    /// Delay strategy.
    pub strategy: BackoffStrategy,

    /// Upper bound on the delay when using exponential backoff.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            delay_ms: 1000,
            strategy: BackoffStrategy::Fixed,
            max_delay_ms: 8000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Record request metrics through the `metrics` facade.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(config.api.timeout_ms, 15_000);
        assert_eq!(config.retries.max_retries, 2);
        assert_eq!(config.retries.delay_ms, 1000);
        assert_eq!(config.retries.strategy, BackoffStrategy::Fixed);
    }

    #[test]
    fn test_partial_sections_merge_with_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
            [retries]
            strategy = "exponential"
            delay_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.retries.strategy, BackoffStrategy::Exponential);
        assert_eq!(config.retries.delay_ms, 250);
        assert_eq!(config.retries.max_retries, 2);
        assert_eq!(config.observability.log_level, "info");
    }
}

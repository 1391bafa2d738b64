//! Configuration validation.
//!
//! Serde handles syntax; this pass checks value ranges and that the base
//! URL can actually be requested. Every problem is reported, not just the
//! first one.

use std::fmt;

use url::Url;

use crate::config::schema::{BackoffStrategy, ClientConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "api.base_url").
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate a deserialized configuration.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.api.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError {
            field: "api.base_url",
            message: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError {
            field: "api.base_url",
            message: format!("invalid URL '{}': {}", config.api.base_url, e),
        }),
    }

    if config.api.timeout_ms == 0 {
        errors.push(ValidationError {
            field: "api.timeout_ms",
            message: "must be greater than 0".to_string(),
        });
    }

    if config.retries.strategy == BackoffStrategy::Exponential
        && config.retries.max_delay_ms < config.retries.delay_ms
    {
        errors.push(ValidationError {
            field: "retries.max_delay_ms",
            message: format!(
                "must be at least delay_ms ({})",
                config.retries.delay_ms
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

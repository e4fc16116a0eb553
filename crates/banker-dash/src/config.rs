//! Configuration for the dashboard orchestration

use crate::error::{DashError, Result};
use banker_llm::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the dashboard: model selection, retry knobs, and
/// the analysis thinking budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashConfig {
    /// Model identifier passed to the provider
    pub model: String,

    /// Total attempts per remote call (first try included)
    pub max_retries: u32,

    /// Initial backoff duration for retries
    pub retry_backoff_base: Duration,

    /// Thinking effort hint for analysis and comparison calls, in tokens
    pub thinking_budget: u32,

    /// Request timeout duration
    pub request_timeout: Duration,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            max_retries: 3,
            retry_backoff_base: Duration::from_secs(2),
            thinking_budget: 2048,
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl DashConfig {
    /// Create a new configuration builder
    pub fn builder() -> DashConfigBuilder {
        DashConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_retries == 0 {
            return Err(DashError::Config(
                "max_retries must be greater than 0".to_string(),
            ));
        }
        if self.model.is_empty() {
            return Err(DashError::Config("model must not be empty".to_string()));
        }
        Ok(())
    }

    /// Retry policy derived from the retry knobs
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_retries,
            self.retry_backoff_base,
            Duration::from_secs(30),
            2.0,
        )
    }
}

/// Builder for DashConfig
#[derive(Debug, Default)]
pub struct DashConfigBuilder {
    model: Option<String>,
    max_retries: Option<u32>,
    retry_backoff_base: Option<Duration>,
    thinking_budget: Option<u32>,
    request_timeout: Option<Duration>,
}

impl DashConfigBuilder {
    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the total attempts per remote call
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Set the initial retry backoff
    pub fn retry_backoff_base(mut self, base: Duration) -> Self {
        self.retry_backoff_base = Some(base);
        self
    }

    /// Set the analysis thinking budget
    pub fn thinking_budget(mut self, budget: u32) -> Self {
        self.thinking_budget = Some(budget);
        self
    }

    /// Set the request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Build the configuration, falling back to defaults
    pub fn build(self) -> DashConfig {
        let defaults = DashConfig::default();
        DashConfig {
            model: self.model.unwrap_or(defaults.model),
            max_retries: self.max_retries.unwrap_or(defaults.max_retries),
            retry_backoff_base: self
                .retry_backoff_base
                .unwrap_or(defaults.retry_backoff_base),
            thinking_budget: self.thinking_budget.unwrap_or(defaults.thinking_budget),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        }
    }
}

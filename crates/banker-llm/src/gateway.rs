//! Gateway facade: one provider, one retry policy, every remote call

use crate::error::Result;
use crate::provider::GenerativeProvider;
use crate::request::{GenerateOptions, PromptSpec};
use crate::retry::RetryPolicy;
use std::sync::Arc;

/// Wraps a provider with the retry policy so every remote call in the
/// system recovers from transient failures the same way.
///
/// The gateway has no side effects beyond the network call and never
/// caches responses.
pub struct AiGateway {
    provider: Arc<dyn GenerativeProvider>,
    policy: RetryPolicy,
}

impl AiGateway {
    /// Create a gateway with the default retry policy
    pub fn new(provider: Arc<dyn GenerativeProvider>) -> Self {
        Self {
            provider,
            policy: RetryPolicy::default(),
        }
    }

    /// Override the retry policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Provider name, for logging
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Invoke the model: validate options, then run the provider call
    /// under the retry policy.
    ///
    /// Transient failures are retried with exponential backoff; after
    /// exhaustion the last error propagates. Non-transient failures
    /// propagate immediately. Errors are never swallowed at this layer.
    pub async fn invoke(
        &self,
        operation_name: &str,
        spec: &PromptSpec,
        options: &GenerateOptions,
    ) -> Result<String> {
        options.validate()?;
        self.policy
            .execute(operation_name, || self.provider.generate(spec, options))
            .await
    }
}

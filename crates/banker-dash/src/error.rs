//! Error types for orchestration operations

use thiserror::Error;

/// Result type for orchestration operations
pub type Result<T> = std::result::Result<T, DashError>;

/// Errors surfaced by the orchestration layer
#[derive(Error, Debug)]
pub enum DashError {
    /// Remote model call failed (after retries, for transient signals)
    #[error("Gateway error: {0}")]
    Gateway(#[from] banker_llm::GatewayError),

    /// Model output could not be coerced into the expected shape
    #[error("{0}")]
    Malformed(#[from] banker_core::NormalizeError),

    /// The Q&A call errored; no answer was produced and the question is
    /// preserved for resubmission
    #[error("Ask failed: {0}")]
    AskFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_converts() {
        let err: DashError = banker_llm::GatewayError::EmptyResponse.into();
        assert!(matches!(err, DashError::Gateway(_)));
    }

    #[test]
    fn test_ask_failed_display() {
        let err = DashError::AskFailed("model unavailable".into());
        assert_eq!(err.to_string(), "Ask failed: model unavailable");
    }
}

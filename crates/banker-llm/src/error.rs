//! Error types for gateway operations

use thiserror::Error;

/// Result type for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors that can occur when calling the remote generative service
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Rate limit exceeded (HTTP 429 or quota message)
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Service temporarily unavailable (HTTP 503)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Invalid API key or authentication failed
    #[error("Invalid API key or authentication failed")]
    AuthenticationFailed,

    /// Invalid request (bad options or rejected payload)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// API request failed
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// The model returned no candidates / no text
    #[error("Empty response from model")]
    EmptyResponse,

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl GatewayError {
    /// Whether a failure is expected to succeed on retry.
    ///
    /// Rate limits and temporary unavailability are transient; so is any
    /// request failure whose message carries the service's known transient
    /// vocabulary (quota exhaustion surfaces inside message bodies, not
    /// only as status codes).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited(_) | Self::ServiceUnavailable(_) => true,
            Self::RequestFailed(msg) | Self::UnexpectedResponse(msg) => {
                is_transient_message(msg)
            }
            Self::Http(e) => {
                e.is_timeout()
                    || e.status().is_some_and(|s| {
                        s.as_u16() == 429 || s.as_u16() == 503
                    })
            }
            _ => false,
        }
    }
}

/// Transient-error vocabulary used by the remote service in message bodies.
fn is_transient_message(msg: &str) -> bool {
    msg.contains("429")
        || msg.contains("503")
        || msg.contains("quota")
        || msg.contains("RESOURCE_EXHAUSTED")
        || msg.contains("UNAVAILABLE")
}

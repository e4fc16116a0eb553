//! Error types for normalization

use thiserror::Error;

/// Result type for normalization operations
pub type Result<T> = std::result::Result<T, NormalizeError>;

/// Errors raised when model output cannot be coerced into the requested
/// shape even after defensive repair
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// The raw text did not parse into the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for NormalizeError {
    fn from(err: serde_json::Error) -> Self {
        NormalizeError::Malformed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_folds_into_malformed() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let norm: NormalizeError = err.into();
        assert!(norm.to_string().starts_with("Malformed response:"));
    }
}

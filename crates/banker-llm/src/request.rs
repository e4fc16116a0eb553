//! Prompt and call-option types for gateway requests

use crate::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};

/// A file payload attached to a prompt.
///
/// The upload collaborator supplies these already base64-encoded; the
/// gateway forwards them verbatim and performs no content validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// Original file name (used only in prompt text)
    pub name: String,
    /// MIME type (e.g. "application/pdf")
    pub mime_type: String,
    /// Base64-encoded file bytes
    pub data: String,
}

/// A prompt plus its ordered attachments
#[derive(Debug, Clone)]
pub struct PromptSpec {
    /// The prompt text
    pub text: String,
    /// Zero or more file attachments, in upload order
    pub attachments: Vec<Attachment>,
}

impl PromptSpec {
    /// Create a text-only prompt
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachments: Vec::new(),
        }
    }

    /// Attach files to the prompt
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }
}

/// Per-call options for the remote model.
///
/// The service does not support strict-JSON response mode and live web
/// grounding in the same call; callers needing both freshness and
/// structure must ground the call and extract JSON from free text.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Enable live web-grounding search
    pub web_grounding: bool,
    /// Request strict JSON output from the model
    pub strict_json: bool,
    /// Thinking effort hint, in tokens
    pub thinking_budget: Option<u32>,
}

impl GenerateOptions {
    /// Options for a grounded free-text call
    pub fn grounded() -> Self {
        Self {
            web_grounding: true,
            ..Self::default()
        }
    }

    /// Options for a strict-JSON structured call
    pub fn strict_json() -> Self {
        Self {
            strict_json: true,
            ..Self::default()
        }
    }

    /// Set the thinking budget hint
    pub fn with_thinking_budget(mut self, budget: u32) -> Self {
        self.thinking_budget = Some(budget);
        self
    }

    /// Check the mutual-exclusion constraint between grounding and
    /// strict-JSON mode.
    pub fn validate(&self) -> Result<()> {
        if self.web_grounding && self.strict_json {
            return Err(GatewayError::InvalidRequest(
                "web grounding and strict-JSON output are mutually exclusive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grounding_and_strict_json_are_exclusive() {
        let options = GenerateOptions {
            web_grounding: true,
            strict_json: true,
            thinking_budget: None,
        };
        assert!(matches!(
            options.validate(),
            Err(GatewayError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_single_mode_options_validate() {
        assert!(GenerateOptions::grounded().validate().is_ok());
        assert!(GenerateOptions::strict_json()
            .with_thinking_budget(2048)
            .validate()
            .is_ok());
        assert!(GenerateOptions::default().validate().is_ok());
    }

    #[test]
    fn test_prompt_spec_builder() {
        let spec = PromptSpec::text("analyze AAPL").with_attachments(vec![Attachment {
            name: "10k.pdf".into(),
            mime_type: "application/pdf".into(),
            data: "aGVsbG8=".into(),
        }]);
        assert_eq!(spec.text, "analyze AAPL");
        assert_eq!(spec.attachments.len(), 1);
    }
}

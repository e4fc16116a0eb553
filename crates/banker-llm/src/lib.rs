//! Generative-AI gateway for banker-rs
//!
//! This crate wraps every call to the remote generative model. It includes:
//!
//! - Prompt and attachment types for multi-part requests
//! - Call options (web grounding, strict-JSON output, thinking budget)
//! - A retry policy with exponential backoff for transient failures
//! - Provider trait and the Gemini implementation
//! - The `AiGateway` facade that applies the policy uniformly

pub mod error;
pub mod gateway;
pub mod provider;
pub mod providers;
pub mod request;
pub mod retry;

// Re-export main types
pub use error::{GatewayError, Result};
pub use gateway::AiGateway;
pub use provider::GenerativeProvider;
pub use providers::gemini::GeminiProvider;
pub use request::{Attachment, GenerateOptions, PromptSpec};
pub use retry::RetryPolicy;

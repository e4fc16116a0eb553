//! Concrete provider implementations

pub mod gemini;

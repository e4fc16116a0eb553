//! Shared utilities for banker-rs

pub mod logging;

pub use logging::init_tracing;

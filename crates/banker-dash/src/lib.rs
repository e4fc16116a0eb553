//! Orchestration layer for banker-rs
//!
//! The controller here is the system's state machine: it sequences the
//! dependent fetches for a ticker search (quotes first, then either a
//! single-company health/valuation analysis or a multi-company
//! comparison), tracks a generation token so late-arriving results from
//! an abandoned search are discarded, and owns the single mutable
//! view-state aggregate the rendering layer reads.

pub mod config;
pub mod controller;
pub mod error;
pub mod generation;
pub mod prompts;
pub mod session;
pub mod state;
pub mod ticker;

// Re-export main types
pub use config::DashConfig;
pub use controller::{DashboardController, PendingAnalysis};
pub use error::{DashError, Result};
pub use generation::{GenerationCounter, GenerationToken};
pub use session::{AnalysisContext, QaSession};
pub use state::{Phase, ViewState};
pub use ticker::parse_ticker_input;

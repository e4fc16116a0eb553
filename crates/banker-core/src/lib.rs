//! Data model and response normalizer for banker-rs
//!
//! This crate defines the strict internal shapes the dashboard renders
//! (quotes, financial health, valuation, comparison) and the defensive
//! normalization that coerces loosely-structured model output into them.

pub mod error;
pub mod model;
pub mod normalize;

// Re-export main types
pub use error::{NormalizeError, Result};
pub use model::{
    ComparisonResult, ComparisonRow, FinancialHealth, MetricLine, MetricValue, Quote,
    Recommendation, Trend, Valuation,
};
pub use normalize::{
    normalize_analysis, normalize_comparison, normalize_quotes, strip_code_fences,
};

//! Strict internal result shapes
//!
//! Every field the rendering layer can see has a defined fallback; no
//! shape here is ever published partially built.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel for text the model omitted
pub const UNAVAILABLE: &str = "N/A";

/// A single ticker's price snapshot, model-estimated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    /// Abbreviated, e.g. "3.2T" or "150B"
    pub market_cap: String,
    pub currency: String,
    pub retrieved_at: DateTime<Utc>,
}

impl Quote {
    /// Degraded all-default quote, used when the price fetch fails
    /// completely so the display never blocks on missing data.
    pub fn placeholder(symbol: &str, retrieved_at: DateTime<Utc>) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            price: 0.0,
            change: 0.0,
            change_percent: 0.0,
            market_cap: "Unknown".to_string(),
            currency: "USD".to_string(),
            retrieved_at,
        }
    }
}

/// Direction of a financial metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

/// A metric value: the model returns either a number or preformatted text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    /// Render for display
    pub fn to_display(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// One line of a financial statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricLine {
    pub label: String,
    pub value: MetricValue,
    /// Absent when the model gave no direction
    pub trend: Option<Trend>,
}

/// Balance sheet and income statement snapshot with a short summary
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialHealth {
    pub balance_sheet: Vec<MetricLine>,
    pub income_statement: Vec<MetricLine>,
    pub summary: String,
}

/// Analyst verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Buy,
    Sell,
    #[default]
    Hold,
}

/// P/E-multiple valuation estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub pe_ratio: f64,
    pub industry_average_pe: f64,
    pub estimated_fair_value: f64,
    pub recommendation: Recommendation,
    pub reasoning: String,
}

/// One row of the comparison matrix: a metric name and its per-ticker
/// display values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub metric: String,
    /// Ticker symbol -> display text, ordered for stable rendering
    pub values: BTreeMap<String, String>,
}

/// Multi-company comparison analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub table: Vec<ComparisonRow>,
    pub summary: String,
    /// 3-5 bullet points expected, not enforced
    pub executive_summary: Vec<String>,
    pub winner: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_quote_has_no_undefined_fields() {
        let quote = Quote::placeholder("aapl", Utc::now());
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.price, 0.0);
        assert_eq!(quote.market_cap, "Unknown");
        assert_eq!(quote.currency, "USD");
    }

    #[test]
    fn test_recommendation_defaults_to_hold() {
        assert_eq!(Recommendation::default(), Recommendation::Hold);
    }

    #[test]
    fn test_metric_value_display() {
        assert_eq!(MetricValue::Number(3.5).to_display(), "3.5");
        assert_eq!(MetricValue::Text("$1.2B".into()).to_display(), "$1.2B");
    }
}

//! Defensive normalization of model output
//!
//! The upstream model is not contractually guaranteed to match the
//! requested schema, so every expected field gets a documented default
//! when absent, and sub-fields of an unexpected shape are coerced (a
//! single object where an array was expected becomes a one-element
//! sequence). Only a top-level parse failure raises `Malformed`; callers
//! decide whether that degrades to a default object (quote path) or
//! surfaces as a user-visible failure (analysis paths).

use crate::error::{NormalizeError, Result};
use crate::model::{
    ComparisonResult, ComparisonRow, FinancialHealth, MetricLine, MetricValue, Quote,
    Recommendation, Trend, Valuation, UNAVAILABLE,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

/// Strip common non-JSON wrapping (code-fence markers) and trim.
///
/// Grounded calls cannot use strict-JSON response mode, so their output
/// routinely arrives fenced.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

fn parse_top_level(raw: &str) -> Result<Value> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(&cleaned)
        .map_err(|e| NormalizeError::Malformed(format!("top-level JSON parse failed: {e}")))
}

/// Array where expected; a single object coerces to a one-element sequence.
fn coerce_array(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

fn f64_field(obj: &Value, key: &str) -> f64 {
    match obj.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn str_field(obj: &Value, key: &str, default: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .map_or_else(|| default.to_string(), ToString::to_string)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => UNAVAILABLE.to_string(),
        other => other.to_string(),
    }
}

/// Normalize the price-quote response into one quote per ticker.
///
/// A single-object response coerces to a one-element sequence; every
/// missing numeric field defaults to 0 and every missing string field to
/// its sentinel, so the rendering layer never sees an undefined value.
pub fn normalize_quotes(raw: &str, fallback_symbol: &str) -> Result<Vec<Quote>> {
    normalize_quotes_at(raw, fallback_symbol, Utc::now())
}

/// Deterministic variant: the caller supplies the retrieval timestamp.
pub fn normalize_quotes_at(
    raw: &str,
    fallback_symbol: &str,
    retrieved_at: DateTime<Utc>,
) -> Result<Vec<Quote>> {
    let parsed = parse_top_level(raw)?;
    let items = coerce_array(parsed);

    Ok(items
        .iter()
        .map(|item| Quote {
            symbol: {
                let symbol = str_field(item, "symbol", "");
                if symbol.is_empty() {
                    fallback_symbol.to_uppercase()
                } else {
                    symbol
                }
            },
            price: f64_field(item, "price"),
            change: f64_field(item, "change"),
            change_percent: f64_field(item, "changePercent"),
            market_cap: str_field(item, "marketCap", UNAVAILABLE),
            currency: str_field(item, "currency", "USD"),
            retrieved_at,
        })
        .collect())
}

fn metric_line(item: &Value) -> MetricLine {
    let value = match item.get("value") {
        Some(Value::Number(n)) => MetricValue::Number(n.as_f64().unwrap_or(0.0)),
        Some(Value::String(s)) => MetricValue::Text(s.clone()),
        _ => MetricValue::Text(UNAVAILABLE.to_string()),
    };
    let trend = item
        .get("trend")
        .and_then(Value::as_str)
        .and_then(|s| match s.to_lowercase().as_str() {
            "up" => Some(Trend::Up),
            "down" => Some(Trend::Down),
            "neutral" => Some(Trend::Neutral),
            _ => None,
        });
    MetricLine {
        label: str_field(item, "label", UNAVAILABLE),
        value,
        trend,
    }
}

fn metric_lines(section: Option<&Value>) -> Vec<MetricLine> {
    section
        .cloned()
        .map(coerce_array)
        .unwrap_or_default()
        .iter()
        .map(metric_line)
        .collect()
}

fn recommendation(obj: &Value) -> Recommendation {
    obj.get("recommendation")
        .and_then(Value::as_str)
        .map(|s| match s.to_uppercase().as_str() {
            "BUY" => Recommendation::Buy,
            "SELL" => Recommendation::Sell,
            _ => Recommendation::Hold,
        })
        .unwrap_or_default()
}

/// Normalize the single-company analysis envelope into health + valuation.
pub fn normalize_analysis(raw: &str) -> Result<(FinancialHealth, Valuation)> {
    let parsed = parse_top_level(raw)?;
    if !parsed.is_object() {
        return Err(NormalizeError::Malformed(
            "analysis response is not a JSON object".to_string(),
        ));
    }

    let health_obj = parsed.get("health").cloned().unwrap_or(Value::Null);
    let health = FinancialHealth {
        balance_sheet: metric_lines(health_obj.get("balanceSheet")),
        income_statement: metric_lines(health_obj.get("incomeStatement")),
        summary: str_field(&health_obj, "summary", ""),
    };

    let valuation_obj = parsed.get("valuation").cloned().unwrap_or(Value::Null);
    let valuation = Valuation {
        pe_ratio: f64_field(&valuation_obj, "peRatio"),
        industry_average_pe: f64_field(&valuation_obj, "industryAveragePe"),
        estimated_fair_value: f64_field(&valuation_obj, "estimatedFairValue"),
        recommendation: recommendation(&valuation_obj),
        reasoning: str_field(&valuation_obj, "reasoning", ""),
    };

    Ok((health, valuation))
}

/// Normalize the multi-company comparison response.
///
/// Every non-`metric` key of a table row is treated as a ticker column;
/// numeric cells render with their natural display form.
pub fn normalize_comparison(raw: &str) -> Result<ComparisonResult> {
    let parsed = parse_top_level(raw)?;
    if !parsed.is_object() {
        return Err(NormalizeError::Malformed(
            "comparison response is not a JSON object".to_string(),
        ));
    }

    let table = parsed
        .get("table")
        .cloned()
        .map(coerce_array)
        .unwrap_or_default()
        .iter()
        .map(|row| {
            let mut values = BTreeMap::new();
            if let Some(fields) = row.as_object() {
                for (key, cell) in fields {
                    if key != "metric" {
                        values.insert(key.clone(), display_value(cell));
                    }
                }
            }
            ComparisonRow {
                metric: str_field(row, "metric", UNAVAILABLE),
                values,
            }
        })
        .collect();

    let executive_summary = parsed
        .get("executiveSummary")
        .cloned()
        .map(coerce_array)
        .unwrap_or_default()
        .iter()
        .map(display_value)
        .collect();

    Ok(ComparisonResult {
        table,
        summary: str_field(&parsed, "summary", ""),
        executive_summary,
        winner: str_field(&parsed, "winner", UNAVAILABLE),
    })
}

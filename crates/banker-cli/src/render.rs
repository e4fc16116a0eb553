//! Terminal rendering of the view-state aggregate
//!
//! Read-only over the controller's state; all formatting, no mutation.

use banker_core::{ComparisonResult, FinancialHealth, Trend, Valuation};
use banker_dash::ViewState;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

fn trend_marker(trend: Option<Trend>) -> &'static str {
    match trend {
        Some(Trend::Up) => "↑",
        Some(Trend::Down) => "↓",
        Some(Trend::Neutral) => "→",
        None => " ",
    }
}

/// Quote strip: one row per ticker
pub fn render_quotes(state: &ViewState) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Symbol", "Price", "Change", "Change %", "Market Cap", "Currency"]);

    for quote in &state.quotes {
        table.add_row(vec![
            Cell::new(&quote.symbol),
            Cell::new(format!("{:.2}", quote.price)),
            Cell::new(format!("{:+.2}", quote.change)),
            Cell::new(format!("{:+.2}%", quote.change_percent)),
            Cell::new(&quote.market_cap),
            Cell::new(&quote.currency),
        ]);
    }
    table.to_string()
}

fn statement_table(title: &str, lines: &[banker_core::MetricLine]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec![title, "Value", ""]);
    for line in lines {
        table.add_row(vec![
            Cell::new(&line.label),
            Cell::new(line.value.to_display()),
            Cell::new(trend_marker(line.trend)),
        ]);
    }
    table.to_string()
}

/// Balance sheet and income statement panels with the model's summary
pub fn render_health(health: &FinancialHealth) -> String {
    let mut out = String::new();
    out.push_str(&statement_table("Balance Sheet", &health.balance_sheet));
    out.push('\n');
    out.push_str(&statement_table("Income Statement", &health.income_statement));
    if !health.summary.is_empty() {
        out.push_str(&format!("\nSummary: {}\n", health.summary));
    }
    out
}

/// Valuation panel with the fair-value estimate and verdict
pub fn render_valuation(valuation: &Valuation) -> String {
    format!(
        "P/E Ratio: {:.1}   Industry Avg P/E: {:.1}   Est. Fair Value: {:.2}\nRecommendation: {:?}\nReasoning: {}\n",
        valuation.pe_ratio,
        valuation.industry_average_pe,
        valuation.estimated_fair_value,
        valuation.recommendation,
        valuation.reasoning
    )
}

/// Comparison matrix, verdict, and executive summary bullets
pub fn render_comparison(comparison: &ComparisonResult, state: &ViewState) -> String {
    let symbols: Vec<&str> = state.quotes.iter().map(|q| q.symbol.as_str()).collect();

    let mut table = Table::new();
    let mut header = vec!["Metric".to_string()];
    header.extend(symbols.iter().map(ToString::to_string));
    table.load_preset(UTF8_FULL).set_header(header);

    for row in &comparison.table {
        let mut cells = vec![row.metric.clone()];
        for symbol in &symbols {
            cells.push(row.values.get(*symbol).cloned().unwrap_or_else(|| "-".to_string()));
        }
        table.add_row(cells);
    }

    let mut out = String::new();
    if !comparison.executive_summary.is_empty() {
        out.push_str("Performance Comparison Insights:\n");
        for point in &comparison.executive_summary {
            out.push_str(&format!("  • {point}\n"));
        }
        out.push('\n');
    }
    out.push_str(&table.to_string());
    out.push_str(&format!("\nAnalyst Verdict: {}\n", comparison.winner));
    if !comparison.summary.is_empty() {
        out.push_str(&format!("{}\n", comparison.summary));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use banker_core::Quote;
    use chrono::Utc;

    #[test]
    fn test_quote_table_lists_every_symbol() {
        let state = ViewState {
            quotes: vec![
                Quote::placeholder("AAPL", Utc::now()),
                Quote::placeholder("MSFT", Utc::now()),
            ],
            ..ViewState::default()
        };
        let rendered = render_quotes(&state);
        assert!(rendered.contains("AAPL"));
        assert!(rendered.contains("MSFT"));
    }

    #[test]
    fn test_comparison_renders_missing_cells_as_dash() {
        let state = ViewState {
            quotes: vec![
                Quote::placeholder("AAPL", Utc::now()),
                Quote::placeholder("MSFT", Utc::now()),
            ],
            ..ViewState::default()
        };
        let comparison = ComparisonResult {
            table: vec![banker_core::ComparisonRow {
                metric: "P/E".into(),
                values: [("AAPL".to_string(), "29.5".to_string())].into(),
            }],
            summary: String::new(),
            executive_summary: vec![],
            winner: "AAPL".into(),
        };
        let rendered = render_comparison(&comparison, &state);
        assert!(rendered.contains("29.5"));
        assert!(rendered.contains('-'));
        assert!(rendered.contains("Analyst Verdict: AAPL"));
    }
}

//! Prompt templates for the banker workflows
//!
//! Plain formatted strings carrying the exact schemas the normalizer
//! expects back. The quote and comparison prompts run grounded, so their
//! schemas ask the model to keep markdown out of the output; the
//! single-company analysis runs in strict-JSON mode instead.

use crate::state::ViewState;
use banker_llm::Attachment;

/// Prompt for the (grounded) price-quote fetch, one call for the whole
/// ticker set.
pub fn quote_prompt(tickers: &[String]) -> String {
    format!(
        "Find the latest stock price, daily change (absolute and percentage), and market cap for: {}.\n\
         If multiple tickers are provided, return an array of objects.\n\
         Return the data in a strict JSON format (array of objects) with keys: symbol (string), price (number), change (number), changePercent (number), marketCap (string), currency (string).\n\n\
         IMPORTANT: For 'marketCap', return a short string using abbreviations like '3.2T', '150B', '800M' instead of writing out 'Trillion' or 'Billion'.\n\n\
         Do not include markdown formatting.",
        tickers.join(", ")
    )
}

/// Prompt for the single-company health + valuation analysis.
pub fn analysis_prompt(symbol: &str, attachments: &[Attachment]) -> String {
    let mut prompt = format!(
        "Act as a senior investment banker. Analyze the company {symbol}.\n\n\
         1. Financial Health: Provide key metrics for the Balance Sheet (Assets, Liabilities, Equity) and Income Statement (Revenue, Net Income, EBITDA).\n\
         2. Valuation: Estimate a Fair Value price based on a P/E multiple approach. Assume a standard industry P/E or use the actual if known. Compare it to the current market context.\n\n\
         Return the result as a strict JSON object with this schema:\n\
         {{\n\
           \"health\": {{\n\
             \"balanceSheet\": [{{\"label\": \"string\", \"value\": \"string or number\", \"trend\": \"up|down|neutral\"}}],\n\
             \"incomeStatement\": [{{\"label\": \"string\", \"value\": \"string or number\", \"trend\": \"up|down|neutral\"}}],\n\
             \"summary\": \"string (max 2 sentences)\"\n\
           }},\n\
           \"valuation\": {{\n\
             \"peRatio\": number,\n\
             \"industryAveragePe\": number,\n\
             \"estimatedFairValue\": number,\n\
             \"recommendation\": \"BUY|SELL|HOLD\",\n\
             \"reasoning\": \"string (short explanation)\"\n\
           }}\n\
         }}"
    );

    if !attachments.is_empty() {
        let names = attachments
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        prompt.push_str(&format!(
            "\n\nAdditionally, review the attached document(s) labeled \"{names}\" and incorporate any relevant financial insights found within them into your analysis logic."
        ));
    }

    prompt
}

/// Prompt for the (grounded) multi-company comparison.
pub fn comparison_prompt(symbols: &[String]) -> String {
    let first = symbols.first().map_or("TICKER", String::as_str);
    let second = symbols.get(1).map_or("TICKER", String::as_str);
    format!(
        "Act as a senior investment banker. Compare the following companies: {}.\n\n\
         Provide a comparative table of key financial metrics (Price, Market Cap, P/E Ratio, Dividend Yield, Revenue Growth, Net Profit Margin).\n\n\
         Crucially, provide an 'executiveSummary' array containing 3-5 concise, high-impact bullet points summarizing the market comparison trends, relative performance, and key takeaways.\n\n\
         Return the result as a strict JSON format. Do not include extra text outside the JSON.\n\
         Schema:\n\
         {{\n\
           \"table\": [\n\
             {{ \"metric\": \"Price\", \"{first}\": \"...\", \"{second}\": \"...\" }}\n\
           ],\n\
           \"summary\": \"Comparative summary (max 3 sentences)\",\n\
           \"executiveSummary\": [\"Point 1\", \"Point 2\", \"Point 3\"],\n\
           \"winner\": \"Name of the preferred investment choice\"\n\
         }}\n\
         Ensure the JSON structure uses the exact ticker symbols provided as keys in the table objects.",
        symbols.join(", ")
    )
}

/// Prompt for a conversational banker question, with the prior analysis
/// serialized as context.
pub fn banker_prompt(symbols: &str, question: &str, context_json: &str) -> String {
    format!(
        "You are a Senior AI Investment Banker specializing in {symbols}.\n\n\
         Context from previous analysis: {context_json}\n\n\
         User Question: {question}\n\n\
         Instructions:\n\
         1. If asked for Competitor Analysis or Industry Benchmarks, use web search to find current data and compare key metrics (P/E, Revenue Growth, Margins).\n\
         2. If asked for an Investment Recommendation (Buy/Sell/Hold), provide a clear verdict followed by a \"Top 5 Insights\" list justifying your stance.\n\
         3. Keep responses professional, data-driven, and institutional in tone.\n\
         4. Format output with clear headers and bullet points where appropriate."
    )
}

/// Canned follow-up suggestions, per mode.
pub fn sample_prompts(state: &ViewState) -> Vec<String> {
    if state.is_comparison() {
        vec![
            "Compare profit margins".to_string(),
            "P/E Ratio trends".to_string(),
            "Strongest balance sheet".to_string(),
            "LBO analysis suitability".to_string(),
        ]
    } else {
        let symbol = state
            .primary_quote()
            .map_or("the company", |q| q.symbol.as_str());
        vec![
            format!("Is {symbol} undervalued?"),
            format!("Key risks for {symbol}"),
            "Growth drivers analysis".to_string(),
            "Bullish thesis".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_prompt_lists_all_tickers() {
        let prompt = quote_prompt(&["AAPL".into(), "MSFT".into()]);
        assert!(prompt.contains("AAPL, MSFT"));
        assert!(prompt.contains("marketCap"));
    }

    #[test]
    fn test_analysis_prompt_mentions_attachments() {
        let attachments = vec![Attachment {
            name: "annual-report.pdf".into(),
            mime_type: "application/pdf".into(),
            data: String::new(),
        }];
        let prompt = analysis_prompt("AAPL", &attachments);
        assert!(prompt.contains("annual-report.pdf"));

        let bare = analysis_prompt("AAPL", &[]);
        assert!(!bare.contains("attached document"));
    }

    #[test]
    fn test_comparison_prompt_uses_ticker_keys() {
        let prompt = comparison_prompt(&["AAPL".into(), "MSFT".into()]);
        assert!(prompt.contains("\"AAPL\": \"...\""));
        assert!(prompt.contains("\"MSFT\": \"...\""));
    }

    #[test]
    fn test_banker_prompt_embeds_context() {
        let prompt = banker_prompt("AAPL", "Is it a buy?", "{\"peRatio\":29.5}");
        assert!(prompt.contains("specializing in AAPL"));
        assert!(prompt.contains("{\"peRatio\":29.5}"));
        assert!(prompt.contains("Is it a buy?"));
    }
}

//! Ticker-set parsing

/// Parse raw user input into an ordered ticker set.
///
/// Comma, semicolon, and whitespace all delimit; symbols are trimmed and
/// uppercased. Deduplication is not required: cardinality drives the
/// single-vs-comparison branch and a duplicate is the user's choice.
pub fn parse_ticker_input(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_ticker() {
        assert_eq!(parse_ticker_input(" aapl "), vec!["AAPL"]);
    }

    #[test]
    fn test_comma_and_whitespace_delimiters() {
        assert_eq!(
            parse_ticker_input("aapl, msft;goog nvda"),
            vec!["AAPL", "MSFT", "GOOG", "NVDA"]
        );
    }

    #[test]
    fn test_empty_input_yields_empty_set() {
        assert!(parse_ticker_input("").is_empty());
        assert!(parse_ticker_input(" , ; ").is_empty());
    }

    #[test]
    fn test_duplicates_are_preserved() {
        assert_eq!(parse_ticker_input("AAPL,AAPL"), vec!["AAPL", "AAPL"]);
    }
}

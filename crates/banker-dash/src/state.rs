//! The view-state aggregate
//!
//! A single owned state object holding everything the rendering layer
//! reads. Writes are funneled exclusively through the controller's
//! transition handlers; readers never mutate.

use crate::generation::GenerationToken;
use banker_core::{ComparisonResult, FinancialHealth, Quote, Valuation};

/// Controller state machine phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    AnalyzingSingle,
    AnalyzingComparison,
    Settled,
}

/// Everything the dashboard renders, replaced (not merged) per load cycle
#[derive(Debug, Default)]
pub struct ViewState {
    pub phase: Phase,
    /// Token of the currently-authoritative load cycle
    pub generation: Option<GenerationToken>,
    /// Parsed ticker set of the current search
    pub tickers: Vec<String>,
    pub quotes: Vec<Quote>,
    pub health: Option<FinancialHealth>,
    pub valuation: Option<Valuation>,
    pub comparison: Option<ComparisonResult>,
    /// Price data still loading
    pub loading: bool,
    /// Deeper analysis still in flight (decoupled from `loading`: quotes
    /// render as soon as they arrive)
    pub analyzing: bool,
}

impl ViewState {
    /// Whether a captured token still identifies the current generation
    pub fn is_current(&self, token: GenerationToken) -> bool {
        self.generation == Some(token)
    }

    /// Cardinality >= 2 selects comparison mode
    pub fn is_comparison(&self) -> bool {
        self.quotes.len() > 1
    }

    /// First quote of the current set, if any
    pub fn primary_quote(&self) -> Option<&Quote> {
        self.quotes.first()
    }

    /// Enter `Loading` for a new generation: clear every previously
    /// published slice so stale UI never lingers.
    pub(crate) fn begin_load(&mut self, token: GenerationToken, tickers: Vec<String>) {
        self.phase = Phase::Loading;
        self.generation = Some(token);
        self.tickers = tickers;
        self.quotes.clear();
        self.health = None;
        self.valuation = None;
        self.comparison = None;
        self.loading = true;
        self.analyzing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::GenerationCounter;
    use chrono::Utc;

    #[test]
    fn test_begin_load_clears_previous_results() {
        let mut counter = GenerationCounter::new();
        let mut state = ViewState {
            quotes: vec![Quote::placeholder("AAPL", Utc::now())],
            health: Some(FinancialHealth::default()),
            ..ViewState::default()
        };

        let token = counter.next();
        state.begin_load(token, vec!["MSFT".into()]);

        assert_eq!(state.phase, Phase::Loading);
        assert!(state.quotes.is_empty());
        assert!(state.health.is_none());
        assert!(state.loading);
        assert!(state.is_current(token));
    }

    #[test]
    fn test_stale_token_is_not_current() {
        let mut counter = GenerationCounter::new();
        let mut state = ViewState::default();
        let old = counter.next();
        state.begin_load(old, vec!["AAPL".into()]);
        let newer = counter.next();
        state.begin_load(newer, vec!["MSFT".into()]);

        assert!(!state.is_current(old));
        assert!(state.is_current(newer));
    }
}

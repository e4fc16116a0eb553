//! The orchestration controller
//!
//! State machine: `Idle -> Loading -> (AnalyzingSingle |
//! AnalyzingComparison) -> Settled`, re-entering `Loading` on the next
//! search. The controller owns the view-state aggregate and is the only
//! writer; every publish point re-checks the generation token captured
//! at submission time, and a stale result is discarded with no state
//! change. A failing step clears only its own in-progress flag, so the
//! controller always returns to a state from which a new submission is
//! possible.

use crate::config::DashConfig;
use crate::error::{DashError, Result};
use crate::generation::{GenerationCounter, GenerationToken};
use crate::prompts;
use crate::session::QaSession;
use crate::state::{Phase, ViewState};
use crate::ticker::parse_ticker_input;
use banker_core::{normalize_analysis, normalize_comparison, normalize_quotes, Quote};
use banker_llm::{AiGateway, Attachment, GenerateOptions, PromptSpec};
use chrono::Utc;
use tracing::{debug, info, warn};

/// Everything an analysis continuation needs, captured at submission
/// time: the token it must present at publish, the resolved symbols, and
/// the attachment set in effect when the search started.
#[derive(Debug, Clone)]
pub struct PendingAnalysis {
    pub token: GenerationToken,
    pub symbols: Vec<String>,
    pub attachments: Vec<Attachment>,
}

/// Central coordinator for searches, analyses, and the Q&A session
pub struct DashboardController {
    gateway: AiGateway,
    config: DashConfig,
    state: ViewState,
    counter: GenerationCounter,
    qa: QaSession,
    attachments: Vec<Attachment>,
}

impl DashboardController {
    pub fn new(gateway: AiGateway, config: DashConfig) -> Self {
        Self {
            gateway,
            config,
            state: ViewState::default(),
            counter: GenerationCounter::new(),
            qa: QaSession::default(),
            attachments: Vec::new(),
        }
    }

    /// Read-only view of the aggregate
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Read-only view of the Q&A exchange
    pub fn qa(&self) -> &QaSession {
        &self.qa
    }

    /// `Idle/Settled --submit--> Loading`: parse the ticker set, mint a
    /// new generation, clear all published results, and fetch quotes for
    /// every ticker in one call.
    ///
    /// Quote failure never blocks the UI: retry exhaustion or malformed
    /// output degrades to placeholder quotes (logged). Returns the
    /// pending analysis for the deeper fetch, or `None` when the input
    /// held no tickers.
    pub async fn submit(&mut self, input: &str) -> Result<Option<PendingAnalysis>> {
        let tickers = parse_ticker_input(input);
        if tickers.is_empty() {
            self.state = ViewState::default();
            self.qa.reset();
            return Ok(None);
        }

        let token = self.counter.next();
        info!(generation = token.value(), tickers = ?tickers, "Starting new load cycle");
        self.state.begin_load(token, tickers.clone());
        self.qa.reset();

        let spec = PromptSpec::text(prompts::quote_prompt(&tickers));
        let fallback = tickers[0].clone();
        let quotes = match self
            .gateway
            .invoke("fetch_quotes", &spec, &GenerateOptions::grounded())
            .await
        {
            Ok(raw) => match normalize_quotes(&raw, &fallback) {
                Ok(quotes) if !quotes.is_empty() => quotes,
                Ok(_) => {
                    warn!("Quote response held no entries; degrading to placeholders");
                    placeholder_quotes(&tickers)
                }
                Err(e) => {
                    warn!("Quote response malformed ({e}); degrading to placeholders");
                    placeholder_quotes(&tickers)
                }
            },
            Err(e) => {
                warn!("Quote fetch failed ({e}); degrading to placeholders");
                placeholder_quotes(&tickers)
            }
        };

        Ok(self.publish_quotes(token, quotes))
    }

    /// `Loading --quotesReceived--> AnalyzingSingle|AnalyzingComparison`.
    ///
    /// The loading indicator clears as soon as quotes land; the
    /// analyzing indicator stays up until the deeper call resolves.
    fn publish_quotes(&mut self, token: GenerationToken, quotes: Vec<Quote>) -> Option<PendingAnalysis> {
        if !self.state.is_current(token) {
            debug!(generation = token.value(), "Discarding stale quote result");
            return None;
        }

        let symbols: Vec<String> = quotes.iter().map(|q| q.symbol.clone()).collect();
        self.state.quotes = quotes;
        self.state.loading = false;
        self.state.analyzing = true;
        self.state.phase = if symbols.len() > 1 {
            Phase::AnalyzingComparison
        } else {
            Phase::AnalyzingSingle
        };

        Some(PendingAnalysis {
            token,
            symbols,
            attachments: self.attachments.clone(),
        })
    }

    /// `Analyzing* --resultReceived--> Settled`: run the branch selected
    /// by ticker-set cardinality and publish only if the captured token
    /// is still current.
    ///
    /// On failure the analyzing indicator clears (when current) and the
    /// error propagates; previously settled sibling state is untouched.
    pub async fn resolve_analysis(&mut self, pending: PendingAnalysis) -> Result<()> {
        if pending.symbols.len() > 1 {
            self.resolve_comparison(pending).await
        } else {
            self.resolve_single(pending).await
        }
    }

    async fn resolve_single(&mut self, pending: PendingAnalysis) -> Result<()> {
        let symbol = pending.symbols.first().cloned().unwrap_or_default();
        let spec = PromptSpec::text(prompts::analysis_prompt(&symbol, &pending.attachments))
            .with_attachments(pending.attachments.clone());
        let options =
            GenerateOptions::strict_json().with_thinking_budget(self.config.thinking_budget);

        let outcome = self
            .gateway
            .invoke("financial_analysis", &spec, &options)
            .await
            .map_err(DashError::from)
            .and_then(|raw| normalize_analysis(&raw).map_err(DashError::from));

        match outcome {
            Ok((health, valuation)) => {
                if !self.state.is_current(pending.token) {
                    debug!(
                        generation = pending.token.value(),
                        "Discarding stale single-company analysis"
                    );
                    return Ok(());
                }
                self.state.health = Some(health);
                self.state.valuation = Some(valuation);
                self.settle();
                Ok(())
            }
            Err(e) => self.fail_analysis(pending.token, e),
        }
    }

    async fn resolve_comparison(&mut self, pending: PendingAnalysis) -> Result<()> {
        // Grounded call: strict-JSON mode is unavailable, so the
        // normalizer strips fences from free text instead.
        let spec = PromptSpec::text(prompts::comparison_prompt(&pending.symbols));
        let options =
            GenerateOptions::grounded().with_thinking_budget(self.config.thinking_budget);

        let outcome = self
            .gateway
            .invoke("comparison_analysis", &spec, &options)
            .await
            .map_err(DashError::from)
            .and_then(|raw| normalize_comparison(&raw).map_err(DashError::from));

        match outcome {
            Ok(comparison) => {
                if !self.state.is_current(pending.token) {
                    debug!(
                        generation = pending.token.value(),
                        "Discarding stale comparison analysis"
                    );
                    return Ok(());
                }
                self.state.comparison = Some(comparison);
                self.settle();
                Ok(())
            }
            Err(e) => self.fail_analysis(pending.token, e),
        }
    }

    fn settle(&mut self) {
        self.state.analyzing = false;
        self.state.phase = Phase::Settled;
    }

    fn fail_analysis(&mut self, token: GenerationToken, error: DashError) -> Result<()> {
        if self.state.is_current(token) {
            warn!("Analysis step failed: {error}");
            self.settle();
            Err(error)
        } else {
            debug!(
                generation = token.value(),
                "Stale analysis failed after being superseded; ignoring"
            );
            Ok(())
        }
    }

    /// New research material arrived. When exactly one ticker is current
    /// and no load is in progress, re-run the single-company branch with
    /// the new attachment set under a freshly minted token, so an
    /// upload-triggered analysis can never race a ticker-change one.
    pub fn attach_research(&mut self, files: Vec<Attachment>) -> Option<PendingAnalysis> {
        self.attachments = files;

        if self.state.quotes.len() != 1 || self.state.loading {
            return None;
        }

        let token = self.counter.next();
        self.state.generation = Some(token);
        self.state.analyzing = true;
        self.state.phase = Phase::AnalyzingSingle;

        let symbol = self.state.quotes[0].symbol.clone();
        info!(generation = token.value(), %symbol, "Re-analyzing with new research material");
        Some(PendingAnalysis {
            token,
            symbols: vec![symbol],
            attachments: self.attachments.clone(),
        })
    }

    /// Ask the banker a follow-up question with the current analysis as
    /// context. Delegates to the Q&A session, which exclusively owns the
    /// answer slot.
    pub async fn ask(&mut self, question: &str) -> Result<String> {
        self.qa.ask(&self.gateway, question, &self.state).await
    }
}

fn placeholder_quotes(tickers: &[String]) -> Vec<Quote> {
    let now = Utc::now();
    tickers.iter().map(|t| Quote::placeholder(t, now)).collect()
}

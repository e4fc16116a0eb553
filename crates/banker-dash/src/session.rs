//! Conversational Q&A session
//!
//! Tracks the single active question/answer exchange. Only one question
//! is ever in flight: the UI contract disables submission while
//! `in_flight` is set, so the session needs no guard beyond the flag.

use crate::error::{DashError, Result};
use crate::prompts;
use crate::state::ViewState;
use banker_llm::{AiGateway, GenerateOptions, PromptSpec};
use serde::Serialize;
use tracing::{debug, warn};

/// Prior analysis passed as context to the banker prompt
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AnalysisContext {
    Comparison(banker_core::ComparisonResult),
    Single {
        health: Option<banker_core::FinancialHealth>,
        valuation: Option<banker_core::Valuation>,
    },
}

impl AnalysisContext {
    /// Select context by current mode: the full comparison result for
    /// multi-ticker searches, a health + valuation composite otherwise.
    pub fn from_state(state: &ViewState) -> Self {
        if state.is_comparison() {
            match &state.comparison {
                Some(comparison) => Self::Comparison(comparison.clone()),
                None => Self::Single {
                    health: None,
                    valuation: None,
                },
            }
        } else {
            Self::Single {
                health: state.health.clone(),
                valuation: state.valuation.clone(),
            }
        }
    }

    /// Serialize for prompt embedding; a serialization failure degrades
    /// to an empty context rather than blocking the question.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// The single tracked question/answer exchange
#[derive(Debug, Default)]
pub struct QaSession {
    /// Question the user last submitted (preserved on failure so they
    /// may resubmit)
    pub last_question: String,
    /// Answer text, absent until a call succeeds
    pub answer: Option<String>,
    /// Whether a question is currently in flight
    pub in_flight: bool,
}

impl QaSession {
    /// Drop the exchange, e.g. when a new search starts
    pub fn reset(&mut self) {
        self.last_question.clear();
        self.answer = None;
        self.in_flight = false;
    }

    /// Ask the banker a question with the current analysis as context.
    ///
    /// On failure the session returns to idle with no answer published;
    /// the question is not retried automatically.
    pub async fn ask(
        &mut self,
        gateway: &AiGateway,
        question: &str,
        state: &ViewState,
    ) -> Result<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(DashError::AskFailed("question is empty".to_string()));
        }
        if state.quotes.is_empty() {
            return Err(DashError::AskFailed(
                "no company is loaded to ask about".to_string(),
            ));
        }

        self.last_question = question.to_string();
        self.answer = None;
        self.in_flight = true;

        let symbols = state
            .quotes
            .iter()
            .map(|q| q.symbol.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let context = AnalysisContext::from_state(state);
        let prompt = prompts::banker_prompt(&symbols, question, &context.to_json());
        debug!(%symbols, "Asking the banker");

        match gateway
            .invoke(
                "ask_banker",
                &PromptSpec::text(prompt),
                &GenerateOptions::grounded(),
            )
            .await
        {
            Ok(text) => {
                self.answer = Some(text.clone());
                self.in_flight = false;
                Ok(text)
            }
            Err(e) => {
                warn!("Banker question failed: {e}");
                self.in_flight = false;
                Err(DashError::AskFailed(e.to_string()))
            }
        }
    }
}

//! Full scenario: search, analyze, ask, export
//!
//! Drives the controller through a complete single-company cycle with a
//! scripted provider standing in for the remote model.

use async_trait::async_trait;
use banker_dash::{DashConfig, DashboardController, Phase};
use banker_export::{to_csv, ExportRequest};
use banker_llm::{AiGateway, GatewayError, GenerateOptions, GenerativeProvider, PromptSpec, RetryPolicy};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

struct ScriptedProvider {
    replies: Mutex<VecDeque<String>>,
}

#[async_trait]
impl GenerativeProvider for ScriptedProvider {
    async fn generate(
        &self,
        _spec: &PromptSpec,
        _options: &GenerateOptions,
    ) -> banker_llm::Result<String> {
        self.replies
            .lock()
            .expect("lock")
            .pop_front()
            .ok_or(GatewayError::EmptyResponse)
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

fn controller_with(replies: Vec<&str>) -> DashboardController {
    let provider = Arc::new(ScriptedProvider {
        replies: Mutex::new(replies.into_iter().map(ToString::to_string).collect()),
    });
    let gateway = AiGateway::new(provider).with_policy(RetryPolicy::no_retry());
    DashboardController::new(gateway, DashConfig::default())
}

const QUOTE: &str = r#"[{"symbol": "AAPL", "price": 150.00, "change": 2.1, "changePercent": 1.4, "marketCap": "3.2T", "currency": "USD"}]"#;
const ANALYSIS: &str = r#"{
    "health": {
        "balanceSheet": [{"label": "Total Assets", "value": "352B", "trend": "up"}],
        "incomeStatement": [{"label": "Revenue", "value": "394B", "trend": "up"}],
        "summary": "Healthy balance sheet with steady top-line growth."
    },
    "valuation": {
        "peRatio": 29.5,
        "industryAveragePe": 24.0,
        "estimatedFairValue": 172.0,
        "recommendation": "BUY",
        "reasoning": "Trades below estimated fair value."
    }
}"#;
const ANSWER: &str = "Yes. AAPL trades below our estimated fair value of 172.00, supported by strong free cash flow.";

#[tokio::test]
async fn single_company_cycle_from_search_to_csv_export() {
    let mut controller = controller_with(vec![QUOTE, ANALYSIS, ANSWER]);

    // Search publishes the quote immediately.
    let pending = controller
        .submit("AAPL")
        .await
        .expect("submit")
        .expect("one ticker");
    {
        let state = controller.state();
        assert_eq!(state.quotes[0].symbol, "AAPL");
        assert_eq!(state.quotes[0].price, 150.00);
        assert!(!state.loading);
        assert!(state.analyzing);
    }

    // Single-company branch settles with health + valuation, no comparison.
    controller.resolve_analysis(pending).await.expect("analysis");
    {
        let state = controller.state();
        assert_eq!(state.phase, Phase::Settled);
        let health = state.health.as_ref().expect("health");
        assert_eq!(health.balance_sheet[0].label, "Total Assets");
        let valuation = state.valuation.as_ref().expect("valuation");
        assert_eq!(valuation.estimated_fair_value, 172.0);
        assert!(state.comparison.is_none());
    }

    // The banker answers with the analysis as context.
    let answer = controller
        .ask("Is AAPL undervalued?")
        .await
        .expect("answer");
    assert!(!answer.is_empty());
    assert_eq!(controller.qa().answer.as_deref(), Some(ANSWER));

    // CSV export is exactly the quoted question/answer pair.
    let csv = to_csv(&ExportRequest {
        symbol: "AAPL".to_string(),
        question: controller.qa().last_question.clone(),
        answer: answer.clone(),
    });
    assert_eq!(
        csv,
        format!("\"Question\",\"Answer\"\n\"Is AAPL undervalued?\",\"{ANSWER}\"")
    );
}

#[tokio::test]
async fn new_search_clears_previous_answer() {
    let mut controller = controller_with(vec![QUOTE, ANALYSIS, ANSWER, QUOTE]);

    let pending = controller.submit("AAPL").await.expect("a").expect("a");
    controller.resolve_analysis(pending).await.expect("analysis");
    controller.ask("Is AAPL undervalued?").await.expect("answer");
    assert!(controller.qa().answer.is_some());

    controller.submit("AAPL").await.expect("second search");
    assert!(controller.qa().answer.is_none());
    assert!(controller.qa().last_question.is_empty());
}

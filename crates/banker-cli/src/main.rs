//! Interactive terminal dashboard for banker-rs
//!
//! The rendering collaborator: drives the orchestration controller from
//! a stdin command loop and renders its view-state after each change.

mod render;

use anyhow::Context;
use banker_dash::{prompts, DashConfig, DashboardController};
use banker_export::{export, ExportFormat, ExportRequest};
use banker_llm::{AiGateway, Attachment, GeminiProvider};
use base64::Engine as _;
use clap::Parser;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "banker")]
#[command(about = "Interactive AI investment-banker dashboard", long_about = None)]
struct Args {
    /// Model identifier
    #[arg(long)]
    model: Option<String>,

    /// Ticker set to load on startup (comma-separated)
    #[arg(long)]
    tickers: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    banker_utils::init_tracing();
    let args = Args::parse();

    let mut builder = DashConfig::builder();
    if let Some(model) = args.model {
        builder = builder.model(model);
    }
    let config = builder.build();
    config.validate()?;

    let api_key = std::env::var("GEMINI_API_KEY").context("GEMINI_API_KEY not set")?;
    let provider = GeminiProvider::with_timeout(api_key, &config.model, config.request_timeout)?;
    let gateway = AiGateway::new(Arc::new(provider)).with_policy(config.retry_policy());
    let mut controller = DashboardController::new(gateway, config);

    info!("Starting banker CLI");
    println!("banker — AI investment-banker dashboard");
    println!("Enter a ticker or a comma-separated set. Commands: /ask <question>, /attach <file>, /export <csv|doc|report|slides>, /quit");

    if let Some(tickers) = args.tickers {
        run_search(&mut controller, &tickers).await;
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('/') {
            let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
            match name {
                "quit" | "exit" => break,
                "ask" => run_ask(&mut controller, rest).await,
                "attach" => run_attach(&mut controller, rest).await,
                "export" => run_export(&controller, rest),
                "prompts" => {
                    for suggestion in prompts::sample_prompts(controller.state()) {
                        println!("  • {suggestion}");
                    }
                }
                _ => println!("Unknown command: /{name}"),
            }
        } else {
            run_search(&mut controller, line).await;
        }
    }

    Ok(())
}

async fn run_search(controller: &mut DashboardController, input: &str) {
    match controller.submit(input).await {
        Ok(Some(pending)) => {
            println!("{}", render::render_quotes(controller.state()));
            println!("Analyzing...");
            match controller.resolve_analysis(pending).await {
                Ok(()) => print_analysis(controller),
                Err(e) => eprintln!("Analysis unavailable: {e}"),
            }
            println!("Try asking:");
            for suggestion in prompts::sample_prompts(controller.state()) {
                println!("  • {suggestion}");
            }
        }
        Ok(None) => println!("No tickers given."),
        Err(e) => eprintln!("Search failed: {e}"),
    }
}

fn print_analysis(controller: &DashboardController) {
    let state = controller.state();
    if let Some(comparison) = &state.comparison {
        println!("{}", render::render_comparison(comparison, state));
    }
    if let Some(health) = &state.health {
        println!("{}", render::render_health(health));
    }
    if let Some(valuation) = &state.valuation {
        println!("{}", render::render_valuation(valuation));
    }
}

async fn run_ask(controller: &mut DashboardController, question: &str) {
    if controller.qa().in_flight {
        println!("A question is already in flight.");
        return;
    }
    match controller.ask(question).await {
        Ok(answer) => println!("\n{answer}\n"),
        Err(e) => eprintln!("{e} — ask again."),
    }
}

async fn run_attach(controller: &mut DashboardController, path: &str) {
    match load_attachment(path) {
        Ok(attachment) => {
            println!("Attached {}", attachment.name);
            if let Some(pending) = controller.attach_research(vec![attachment]) {
                println!("Re-analyzing with new research material...");
                match controller.resolve_analysis(pending).await {
                    Ok(()) => print_analysis(controller),
                    Err(e) => eprintln!("Analysis unavailable: {e}"),
                }
            }
        }
        Err(e) => eprintln!("Could not attach: {e}"),
    }
}

fn run_export(controller: &DashboardController, format_name: &str) {
    let Some(format) = ExportFormat::parse(format_name) else {
        println!("Unknown format: {format_name} (expected csv, doc, report, or slides)");
        return;
    };
    let qa = controller.qa();
    let Some(answer) = &qa.answer else {
        println!("Nothing to export yet — ask a question first.");
        return;
    };

    let symbol = controller
        .state()
        .primary_quote()
        .map_or_else(|| "Analysis".to_string(), |q| q.symbol.clone());
    let document = export(
        format,
        &ExportRequest {
            symbol,
            question: qa.last_question.clone(),
            answer: answer.clone(),
        },
    );
    match std::fs::write(&document.file_name, &document.content) {
        Ok(()) => println!("Saved {}", document.file_name),
        Err(e) => eprintln!("Could not write {}: {e}", document.file_name),
    }
}

fn load_attachment(path: &str) -> anyhow::Result<Attachment> {
    let path = Path::new(path.trim());
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .map_or_else(|| "attachment".to_string(), |n| n.to_string_lossy().into_owned());
    Ok(Attachment {
        mime_type: mime_for(&name).to_string(),
        data: base64::engine::general_purpose::STANDARD.encode(bytes),
        name,
    })
}

fn mime_for(file_name: &str) -> &'static str {
    match Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("csv") => "text/csv",
        Some("txt") | Some("md") => "text/plain",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

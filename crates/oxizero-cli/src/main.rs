//! OxiZero CLI — entry point.
//!
//! # Commands
//!
//! - `oxizero run [model] <prompt...>` — single-shot: stream the answer, exit
//! - `oxizero run [model]` / `oxizero` — interactive REPL
//!
//! The optional model word is a shortcut (`claude`, `gpt`, `gemini`); any
//! other first word is part of the prompt.

mod helpers;
mod repl;

use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use oxizero_agent::{build_registry, ConversationDriver};
use oxizero_core::config::load_config;
use oxizero_core::context::ExecutionContext;
use oxizero_core::types::{CancelToken, ConversationTranscript};
use oxizero_providers::http_provider::HttpProvider;
use oxizero_providers::registry::split_model_args;
use oxizero_providers::traits::ModelProvider;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// 🤖 OxiZero — a general-purpose agent that grows and learns
#[derive(Parser)]
#[command(name = "oxizero", version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the agent. Omit the prompt for the interactive REPL.
    Run {
        /// Optional model shortcut followed by the prompt
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

// ─────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────

/// One conversation: a driver plus its running transcript.
pub struct Session {
    pub driver: ConversationDriver,
    pub transcript: ConversationTranscript,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logs);

    match cli.command {
        Some(Commands::Run { args }) => {
            let (shortcut, prompt_words) = split_model_args(&args);
            let prompt = prompt_words.join(" ");
            let session = build_session(shortcut)?;
            if prompt.is_empty() {
                repl::run(session).await
            } else {
                run_once(session, &prompt).await
            }
        }
        None => {
            let session = build_session(None)?;
            repl::run(session).await
        }
    }
}

// ─────────────────────────────────────────────
// Session construction
// ─────────────────────────────────────────────

/// Load config, check credentials, and wire up one agent session.
fn build_session(model_override: Option<&str>) -> Result<Session> {
    let mut config = load_config(None);
    if let Some(model) = model_override {
        config.agent.model = model.to_string();
    }

    let api_key = match std::env::var("ANTHROPIC_API_KEY") {
        Ok(key) if !key.is_empty() => key,
        _ => bail!("API key required. Set ANTHROPIC_API_KEY environment variable."),
    };

    let provider: Arc<dyn ModelProvider> = Arc::new(HttpProvider::new(
        "anthropic",
        config.provider.api_base.clone(),
        api_key,
        config.agent.model.clone(),
    ));

    let context = ExecutionContext::root();
    let tools = build_registry(&context, &provider, &config);
    debug!(tools = ?tools.tool_names(), "tools registered");

    let driver = ConversationDriver::new(provider, tools, context, &config);
    info!(model = %config.agent.model, "agent initialized");

    Ok(Session {
        driver,
        transcript: ConversationTranscript::new(),
    })
}

// ─────────────────────────────────────────────
// One-shot run
// ─────────────────────────────────────────────

/// Stream one answer to stdout and exit.
async fn run_once(mut session: Session, prompt: &str) -> Result<()> {
    let cancel = CancelToken::new();
    let result = session
        .driver
        .run_turn(&mut session.transcript, prompt, &cancel, |delta| {
            print!("{delta}");
            let _ = std::io::stdout().flush();
        })
        .await;

    match result {
        Ok(_) => {
            println!();
            Ok(())
        }
        Err(e) => bail!("agent turn failed: {e}"),
    }
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("oxizero=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

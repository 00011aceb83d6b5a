//! Boardroom binary - composition root.
//!
//! 1. Parse arguments and load configuration from TOML
//! 2. Install tracing on stderr
//! 3. Build the Gemini backend and generation client
//! 4. Run the requested front end: chat REPL, one-shot generation, or catalog

mod cli;

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use boardroom_chat::{ChatError, ChatOrchestrator, SubmitOutcome};
use boardroom_core::{BoardroomConfig, ToolKind, Turn};
use boardroom_llm::{GeminiBackend, GeminiConfig, GenerationClient, SamplingSettings};
use boardroom_tools::{catalog, ToolError, ToolOrchestrator};

use cli::{CliArgs, Command};

fn build_client(config: &BoardroomConfig) -> Result<GenerationClient, Box<dyn std::error::Error>> {
    let gemini = GeminiConfig::from_generation_config(&config.generation)?;
    let backend = GeminiBackend::new(gemini)?;
    let client = GenerationClient::new(
        Arc::new(backend),
        SamplingSettings::from(&config.generation),
    );
    tracing::info!(
        model = %client.sampling().model,
        temperature = client.sampling().temperature,
        "Generation client ready"
    );
    Ok(client)
}

fn format_turn(turn: &Turn) -> String {
    let speaker = if turn.is_user() { "You" } else { "Boardroom" };
    if turn.is_error {
        format!("[{}] {} (error): {}", turn.display_time(), speaker, turn.text)
    } else {
        format!("[{}] {}: {}", turn.display_time(), speaker, turn.text)
    }
}

fn print_turn(turn: &Turn) {
    println!("{}", format_turn(turn));
}

fn prompt() -> std::io::Result<()> {
    print!("> ");
    std::io::stdout().flush()
}

/// Interactive chat on stdin/stdout until `/quit` or EOF.
async fn run_chat(client: GenerationClient) -> Result<(), Box<dyn std::error::Error>> {
    let chat = ChatOrchestrator::new(client);
    for turn in chat.turns()? {
        print_turn(&turn);
    }
    println!("(type /reset to start over, /quit to exit)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" => break,
            "/reset" => {
                chat.reset()?;
                for turn in chat.turns()? {
                    print_turn(&turn);
                }
            }
            _ => match chat.submit(&line).await {
                Ok(SubmitOutcome::Replied(turn)) | Ok(SubmitOutcome::Errored(turn)) => {
                    print_turn(&turn)
                }
                Ok(SubmitOutcome::Discarded) => {}
                Err(ChatError::EmptyMessage) => {}
                Err(e) => return Err(e.into()),
            },
        }
        prompt()?;
    }

    tracing::info!(turns = chat.transcript_len()?, "Chat session ended");
    Ok(())
}

/// Generate a single document. Returns whether a document was produced.
///
/// A generation failure prints the one-time notice and returns `false`;
/// other errors are returned.
async fn run_generate(
    client: GenerationClient,
    tool: ToolKind,
    context: &str,
    output: Option<&Path>,
) -> Result<bool, Box<dyn std::error::Error>> {
    let tools = ToolOrchestrator::new(client);
    tools.select_tool(tool)?;
    eprintln!("{}...", tool.action_label());

    match tools.generate(context).await {
        Ok(doc) => match output {
            Some(path) => {
                std::fs::write(path, doc.to_export_document())?;
                tracing::info!(path = %path.display(), tool = %doc.tool_kind, "Document saved");
                println!("Saved {} to {}", doc.tool_kind, path.display());
            }
            None => println!("{}", doc.content),
        },
        Err(ToolError::Generation(e)) => {
            tracing::error!(code = e.code(), error = %e, "Document generation failed");
            if let Some(notice) = tools.take_notice()? {
                eprintln!("{}", notice);
            }
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    }
    Ok(true)
}

fn catalog_line(kind: ToolKind) -> String {
    format!(
        "{:<20} {:<28} {:<24} {}",
        kind.slug(),
        kind.display_name(),
        kind.action_label(),
        kind.description()
    )
}

fn print_catalog() {
    for kind in catalog() {
        println!("{}", catalog_line(*kind));
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config_file = args.resolve_config_path();
    let mut config = BoardroomConfig::load_or_default(&config_file);
    args.apply_overrides(&mut config);

    let level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level)),
        )
        .init();

    tracing::info!("Starting Boardroom v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!(path = %config_file.display(), "Configuration resolved");

    match args.command {
        Command::Tools => {
            print_catalog();
            Ok(ExitCode::SUCCESS)
        }
        Command::Chat => {
            run_chat(build_client(&config)?).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Generate {
            tool,
            context,
            output,
        } => {
            let client = build_client(&config)?;
            if run_generate(client, tool, &context, output.as_deref()).await? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

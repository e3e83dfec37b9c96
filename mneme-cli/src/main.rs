//! Mneme CLI - Console chat loop over the session manager

use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tokio::io::AsyncBufReadExt;

use mneme_core::config::{LLMProviderConfig, LLMProviderKind, MnemeConfig};
use mneme_core::llm::LLMProviderFactory;
use mneme_core::persistence::TranscriptWriter;
use mneme_core::session::SessionController;

#[derive(Parser)]
#[command(name = "mneme")]
#[command(about = "Conversational session manager with transcript compaction", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a configuration file (defaults to mneme.toml plus MNEME_ env vars)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured model name
    #[arg(short, long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => MnemeConfig::from_file(path)?,
        None => MnemeConfig::load()?,
    };

    // Fall back to a local Ollama endpoint when no provider is configured
    let mut llm_config = config.llm.clone().unwrap_or(LLMProviderConfig {
        provider: LLMProviderKind::Ollama,
        model: String::new(),
        api_key: None,
        base_url: None,
    });
    if let Some(model) = cli.model {
        llm_config.model = model;
    }

    let llm = LLMProviderFactory::create(&llm_config)?;
    let info = llm.model_info();
    tracing::info!(provider = %info.provider, model = %info.model_name, "session starting");

    let mut controller = SessionController::new(&config.session, llm);
    let writer = TranscriptWriter::new(&config.persistence);

    println!("Type 'exit' to quit.\n");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("Enter: ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("\nInterrupted. Saving conversation...");
                break;
            }
            line = lines.next_line() => line?,
        };

        // End of input stream also ends the session
        let Some(line) = line else {
            break;
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") {
            break;
        }

        let outcome = controller.handle_turn(input).await;
        println!("\nAI: {}\n", outcome.reply);
        if outcome.compacted {
            println!("[Memory] Conversation summarized and history trimmed.\n");
        }
    }

    writer.write(&controller.into_state())?;
    println!(
        "Conversation saved to {} and {}",
        config.persistence.text_path.display(),
        config.persistence.jsonl_path.display()
    );

    Ok(())
}

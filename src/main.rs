//! # Main Entry Point
//!
//! Wires one companion interaction end to end: load configuration, set up
//! logging, read a source file into the in-memory buffer, ask the model (or
//! replay a canned reply), and print the resulting buffer.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tokio::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use sidekick::application::handlers::default_registry;
use sidekick::application::session::{CompanionSession, InteractionOutcome};
use sidekick::application::state::SessionState;
use sidekick::domain::config::AppConfig;
use sidekick::domain::traits::ModelProvider;
use sidekick::infrastructure::buffer::TextBuffer;
use sidekick::infrastructure::console::{ConsolePanel, ConsoleVoice};
use sidekick::infrastructure::llm::{OpenAiProvider, ScriptedProvider};

#[derive(Parser)]
#[command(
    name = "sidekick",
    about = "Coding companion: turns a model reply into editor actions and applies them"
)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "sidekick.yaml")]
    config: PathBuf,

    /// Source file loaded into the editing buffer
    file: PathBuf,

    /// What to ask the companion
    #[arg(short, long)]
    prompt: String,

    /// Replay a canned model reply from this file instead of calling the API
    #[arg(long)]
    reply_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Configuration. A missing file is fine, defaults apply.
    let config = if cli.config.exists() {
        AppConfig::load(&cli.config)?
    } else {
        AppConfig::default()
    };

    // 2. Logging: stderr always, session log file when configured.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,hyper=warn,reqwest=warn"));
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let (file_layer, _guard) = match &config.logging.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir))?;
            let appender = tracing_appender::rolling::never(dir, &config.logging.file);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    // 3. The buffer under edit.
    let source = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let mut surface = TextBuffer::from_text(&source);

    // 4. Model: canned reply or the configured endpoint.
    let model: Arc<dyn ModelProvider> = match &cli.reply_file {
        Some(path) => {
            let reply = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read reply file {}", path.display()))?;
            tracing::info!("Replaying canned model reply from {}", path.display());
            Arc::new(ScriptedProvider::single(reply))
        }
        None => Arc::new(OpenAiProvider::from_config(&config.model)?),
    };

    // 5. Wire the session and run one interaction.
    let voice = Arc::new(ConsoleVoice::new(!config.session.voice));
    let registry = default_registry(voice.clone(), Arc::new(ConsolePanel), None);
    let session = CompanionSession::new(
        model,
        registry,
        voice,
        Arc::new(Mutex::new(SessionState::new())),
    )
    .with_file_context(&source);

    match session.run_interaction(&cli.prompt, &mut surface).await {
        InteractionOutcome::Applied(report) => {
            tracing::info!(
                "Applied {} action(s), skipped {}",
                report.applied,
                report.skipped
            );
            println!("{}", surface.text());
            if let Some((start, end)) = surface.selection() {
                eprintln!("(selection: lines {}..={})", start, end);
            }
            Ok(())
        }
        InteractionOutcome::Busy => bail!("session was unexpectedly busy"),
        InteractionOutcome::Failed(message) => bail!("interaction failed: {}", message),
    }
}

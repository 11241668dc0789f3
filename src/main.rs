use std::path::PathBuf;

use clap::{Parser, Subcommand};

use docqa::infrastructure::logging::init_logging;
use docqa::infrastructure::services::IngestOutcome;
use docqa::QaConfig;

#[derive(Parser)]
#[command(name = "docqa", about = "Question answering over a private document corpus")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load an extracted plain-text document into the vector store
    Ingest {
        /// Path to the plain-text file
        path: PathBuf,
        /// Source label; defaults to the file name
        #[arg(long)]
        source: Option<String>,
    },
    /// Ask a question against the ingested corpus
    Ask {
        question: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = QaConfig::load()?;
    init_logging(&config.logging);

    let cli = Cli::parse();
    let services = docqa::build_services(&config).await?;

    match cli.command {
        Command::Ingest { path, source } => {
            let source = source.unwrap_or_else(|| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string())
            });

            let text = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;

            match services.ingestion.ingest(&source, &text).await? {
                IngestOutcome::Ingested { chunks } => {
                    println!("Loaded {} chunks from {}", chunks, source);
                }
                IngestOutcome::Replaced { chunks } => {
                    println!("Replaced {} with {} chunks", source, chunks);
                }
                IngestOutcome::Unchanged => {
                    println!("{} is already up to date", source);
                }
            }
        }
        Command::Ask { question } => {
            let answer = services.query.answer_async(&question).await;
            println!("{answer}");
        }
    }

    Ok(())
}

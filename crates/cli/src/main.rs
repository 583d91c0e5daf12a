mod cli;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use ragchunk_core::{Chunk, ChunkingConfig, Document};
use ragchunk_ingest::{chunk_documents, load_directory, load_json, retain_min_length, ChunkStats, DEFAULT_EXTENSIONS};

use crate::cli::{CliArgs, Command, InputArgs};
use crate::config::CliConfig;

fn main() -> Result<()> {
    ragchunk_core::config::load_dotenv();

    let args = CliArgs::parse();

    // Logs go to stderr so stdout stays clean JSON Lines.
    let default_level = if args.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::load(args.config.as_deref()).context("failed to load configuration")?;

    match args.command {
        Command::Chunk {
            input,
            overrides,
            output,
            batch_size,
        } => {
            let chunking = config.resolve_chunking(&overrides);
            let chunks = load_and_chunk(&input, &chunking)?;

            let mut out = output::open(output.as_deref())?;
            let lines = output::write_jsonl(&mut out, &chunks, batch_size)?;
            info!(chunks = chunks.len(), lines, "wrote chunks");
        }
        Command::Stats { input, overrides } => {
            let chunking = config.resolve_chunking(&overrides);
            let chunks = load_and_chunk(&input, &chunking)?;
            let stats = ChunkStats::from_chunks(&chunks);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Config { overrides } => {
            let chunking = config.resolve_chunking(&overrides);
            chunking.validate()?;
            let effective = CliConfig { chunking };
            print!("{}", toml::to_string_pretty(&effective)?);
        }
    }

    Ok(())
}

fn load_documents(input: &InputArgs) -> Result<Vec<Document>> {
    let documents = match (&input.source.dir, &input.source.json) {
        (_, Some(path)) => load_json(path)
            .with_context(|| format!("failed to load documents from {}", path.display()))?,
        (Some(dir), None) => {
            let extensions: Vec<&str> = if input.extensions.is_empty() {
                DEFAULT_EXTENSIONS.to_vec()
            } else {
                input.extensions.iter().map(String::as_str).collect()
            };
            load_directory(dir, &extensions)
                .with_context(|| format!("failed to load documents from {}", dir.display()))?
        }
        (None, None) => anyhow::bail!("either --dir or --json is required"),
    };

    if documents.is_empty() {
        anyhow::bail!("No documents found");
    }
    Ok(documents)
}

/// Load, chunk and filter. Config errors surface before any document is read.
fn load_and_chunk(input: &InputArgs, chunking: &ChunkingConfig) -> Result<Vec<Chunk>> {
    chunking.validate().context("invalid chunking configuration")?;
    chunking.log_summary();

    let documents = load_documents(input)?;
    info!(count = documents.len(), "documents loaded");

    let results = chunk_documents(&documents, chunking)?;
    for doc in &results {
        info!(document = %doc.document_id, chunks = doc.chunks.len(), "chunked");
    }

    let all: Vec<Chunk> = results.into_iter().flat_map(|r| r.chunks).collect();
    let generated = all.len();
    let kept = retain_min_length(all, chunking.min_chunk_length);
    if kept.len() < generated {
        info!(dropped = generated - kept.len(), min = chunking.min_chunk_length, "dropped short chunks");
    }

    let stats = ChunkStats::from_chunks(&kept);
    info!(
        total = stats.count,
        average = stats.average,
        min = stats.min,
        max = stats.max,
        "chunk statistics"
    );
    Ok(kept)
}

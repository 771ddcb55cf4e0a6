//! # Semantic Sift CLI (`sift`)
//!
//! A thin shell over the library pipeline: resolve configuration, hand the
//! named files to [`IngestionPipeline`], and print what comes back. All
//! pipeline logic lives in the library.
//!
//! ## Usage
//!
//! ```bash
//! # Chunking statistics only — no embedding provider required
//! sift inspect report.pdf notes.txt
//!
//! # Full pipeline plus a similarity query (requires [embedding] config)
//! sift query report.pdf notes.txt --query "deployment checklist" --top-k 3
//! ```
//!
//! Set `RUST_LOG=semantic_sift=debug` for stage-level pipeline tracing.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use semantic_sift::chunk;
use semantic_sift::config::{load_config, Config};
use semantic_sift::embedding::{create_provider, embed_query};
use semantic_sift::extract;
use semantic_sift::models::DocumentInput;
use semantic_sift::pipeline::IngestionPipeline;

/// Semantic Sift — ingest documents and search them by meaning.
#[derive(Parser)]
#[command(
    name = "sift",
    about = "Ingest documents into an in-memory similarity index and query it",
    version
)]
struct Cli {
    /// Path to configuration file (TOML). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract and split the given documents, then print chunk statistics.
    ///
    /// Runs without an embedding provider, so it works with the default
    /// (disabled) configuration. Useful for tuning chunk_size and overlap
    /// before paying for embeddings.
    Inspect {
        /// Documents to ingest, in batch order.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Run the full pipeline and print the top matches for a query.
    ///
    /// Requires an `[embedding]` provider in the configuration; the query
    /// text is embedded with the same provider as the chunks.
    Query {
        /// Documents to ingest, in batch order.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// The query text.
        #[arg(long)]
        query: String,

        /// Number of results to return (defaults to retrieval.top_k).
        #[arg(long)]
        top_k: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Inspect { files } => run_inspect(&cfg, files),
        Commands::Query {
            files,
            query,
            top_k,
        } => run_query(&cfg, files, &query, top_k).await,
    }
}

fn run_inspect(cfg: &Config, files: Vec<PathBuf>) -> Result<()> {
    let document_count = files.len();
    let documents: Vec<DocumentInput> = files.into_iter().map(DocumentInput::Path).collect();

    let raw_text = extract::extract(documents)?;
    let chunks = chunk::split(&raw_text, &cfg.chunking)?;

    let sizes: Vec<usize> = chunks.iter().map(|c| c.text.chars().count()).collect();
    let total: usize = sizes.iter().sum();

    println!("inspect");
    println!("  documents: {}", document_count);
    println!("  characters: {}", raw_text.chars().count());
    println!("  chunks: {}", chunks.len());
    if !chunks.is_empty() {
        println!("  avg chunk chars: {}", total / chunks.len());
        println!("  max chunk chars: {}", sizes.iter().max().unwrap_or(&0));
    }
    println!("ok");

    Ok(())
}

async fn run_query(
    cfg: &Config,
    files: Vec<PathBuf>,
    query: &str,
    top_k: Option<usize>,
) -> Result<()> {
    let provider = create_provider(&cfg.embedding)?;
    let pipeline = IngestionPipeline::new(cfg.chunking.clone())?;

    let documents: Vec<DocumentInput> = files.into_iter().map(DocumentInput::Path).collect();
    let index = pipeline.run(documents, provider.as_ref()).await?;

    let query_vec = embed_query(provider.as_ref(), query).await?;
    let k = top_k.unwrap_or(cfg.retrieval.top_k);
    let hits = index.query(&query_vec, k)?;

    if hits.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, hit) in hits.iter().enumerate() {
        println!(
            "{}. [{:.2}] chunk {} (offset {})",
            i + 1,
            hit.score,
            hit.chunk.index,
            hit.chunk.start_offset
        );
        println!("    \"{}\"", excerpt(&hit.chunk.text, 240));
        println!();
    }

    Ok(())
}

/// First `max_chars` characters with newlines flattened, for one-line display.
fn excerpt(text: &str, max_chars: usize) -> String {
    let flat: String = text
        .chars()
        .take(max_chars)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    flat.trim().to_string()
}

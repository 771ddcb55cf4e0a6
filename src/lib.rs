//! # Semantic Sift
//!
//! A document ingestion and semantic retrieval core.
//!
//! Semantic Sift turns a batch of documents into a queryable in-memory
//! similarity index: text is extracted and concatenated, split into
//! bounded, overlapping chunks, embedded through a pluggable provider, and
//! indexed for cosine-similarity search.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐   ┌─────────┐   ┌───────────┐   ┌─────────────┐
//! │ Documents │──▶│ Extract │──▶│   Split   │──▶│    Embed    │
//! │ PDF/text  │   │         │   │ (overlap) │   │ (provider)  │
//! └───────────┘   └─────────┘   └───────────┘   └──────┬──────┘
//!                                                      ▼
//!                                               ┌─────────────┐
//!                                               │ VectorIndex │──▶ query(v, k)
//!                                               └─────────────┘
//! ```
//!
//! A run is atomic: any stage failure aborts it and no partial index
//! escapes. The index is immutable once built; a new ingestion run builds a
//! new index.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use semantic_sift::config::{ChunkingConfig, EmbeddingConfig};
//! use semantic_sift::embedding::{create_provider, embed_query};
//! use semantic_sift::models::DocumentInput;
//! use semantic_sift::pipeline::IngestionPipeline;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let provider = create_provider(&EmbeddingConfig::default())?;
//! let pipeline = IngestionPipeline::new(ChunkingConfig::default())?;
//!
//! let docs = vec![DocumentInput::path("notes.pdf")];
//! let index = pipeline.run(docs, provider.as_ref()).await?;
//!
//! let query_vec = embed_query(provider.as_ref(), "deployment checklist").await?;
//! for hit in index.query(&query_vec, 5)? {
//!     println!("[{:.2}] {}", hit.score, hit.chunk.text);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration and validation |
//! | [`models`] | Core data types |
//! | [`extract`] | Text extraction from document byte sources |
//! | [`chunk`] | Separator-based splitting with carried overlap |
//! | [`embedding`] | Embedding provider abstraction |
//! | [`index`] | In-memory cosine-similarity index |
//! | [`pipeline`] | Run orchestration and cancellation |

pub mod chunk;
pub mod config;
pub mod embedding;
pub mod extract;
pub mod index;
pub mod models;
pub mod pipeline;

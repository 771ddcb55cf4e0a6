//! Ingestion pipeline orchestration.
//!
//! Coordinates the full run: extract → split → embed → index. A run is
//! atomic from the caller's perspective: any stage failure (or a
//! cancellation observed at a stage boundary) aborts the whole run, and no
//! partial index is ever returned or retained. A new run produces a new
//! [`VectorIndex`]; nothing is shared between runs.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::chunk;
use crate::config::{ChunkingConfig, ConfigurationError};
use crate::embedding::{EmbeddingError, EmbeddingProvider};
use crate::extract::{self, ExtractionError};
use crate::index::{DimensionMismatchError, VectorIndex};
use crate::models::DocumentInput;

/// The pipeline stage a run was in when it failed or was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extracting,
    Splitting,
    Embedding,
    Indexing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Extracting => "extracting",
            Stage::Splitting => "splitting",
            Stage::Embedding => "embedding",
            Stage::Indexing => "indexing",
        };
        f.write_str(name)
    }
}

/// A failed run, carrying the originating stage's error.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("splitting failed: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),
    #[error("indexing failed: {0}")]
    DimensionMismatch(#[from] DimensionMismatchError),
    #[error("run cancelled before the {0} stage")]
    Cancelled(Stage),
}

/// Cooperative cancellation flag, checked at every stage boundary.
///
/// Clone the token, hand one copy to the run, and call
/// [`cancel`](CancelToken::cancel) on the other. A cancelled run never
/// yields a partially populated index.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Orchestrates extract → split → embed → index for one document batch.
///
/// Configuration is explicit and owned: no environment variables, no
/// process-wide state. Two pipelines (or two runs of one pipeline) share
/// nothing, so callers may run them concurrently.
pub struct IngestionPipeline {
    chunking: ChunkingConfig,
}

impl IngestionPipeline {
    /// Create a pipeline with the given chunking configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] for an invalid `chunk_size`/`overlap`
    /// combination, so a misconfigured pipeline cannot be constructed at
    /// all.
    pub fn new(chunking: ChunkingConfig) -> Result<Self, ConfigurationError> {
        chunking.validate()?;
        Ok(Self { chunking })
    }

    /// Run the full pipeline over a document batch.
    pub async fn run(
        &self,
        documents: Vec<DocumentInput>,
        provider: &dyn EmbeddingProvider,
    ) -> Result<VectorIndex, PipelineError> {
        self.run_with_cancel(documents, provider, &CancelToken::new())
            .await
    }

    /// Run the full pipeline, checking `cancel` at each stage boundary.
    pub async fn run_with_cancel(
        &self,
        documents: Vec<DocumentInput>,
        provider: &dyn EmbeddingProvider,
        cancel: &CancelToken,
    ) -> Result<VectorIndex, PipelineError> {
        check_cancelled(cancel, Stage::Extracting)?;
        let document_count = documents.len();
        let raw_text = extract::extract(documents)?;
        debug!(
            documents = document_count,
            chars = raw_text.chars().count(),
            "extraction complete"
        );

        check_cancelled(cancel, Stage::Splitting)?;
        let chunks = chunk::split(&raw_text, &self.chunking)?;
        debug!(chunks = chunks.len(), "splitting complete");

        if chunks.is_empty() {
            // Nothing to embed; an empty batch still yields a queryable
            // (zero-entry) index.
            let index = VectorIndex::build(Vec::new(), Vec::new())?;
            info!(entries = 0usize, "index built");
            return Ok(index);
        }

        check_cancelled(cancel, Stage::Embedding)?;
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = provider.embed(&texts).await?;
        debug!(
            vectors = vectors.len(),
            model = provider.model_name(),
            "embedding complete"
        );

        check_cancelled(cancel, Stage::Indexing)?;
        let index = VectorIndex::build(chunks, vectors)?;
        info!(entries = index.len(), dims = index.dims(), "index built");

        Ok(index)
    }
}

fn check_cancelled(cancel: &CancelToken, stage: Stage) -> Result<(), PipelineError> {
    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled(stage));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_chunking_config_rejected_at_construction() {
        let chunking = ChunkingConfig {
            chunk_size: 10,
            overlap: 10,
            separator: "\n".to_string(),
        };
        assert!(IngestionPipeline::new(chunking).is_err());
    }

    #[test]
    fn stage_display_names() {
        assert_eq!(Stage::Extracting.to_string(), "extracting");
        assert_eq!(Stage::Indexing.to_string(), "indexing");
    }

    #[test]
    fn cancel_token_round_trip() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        let observer = token.clone();
        token.cancel();
        assert!(observer.is_cancelled());
    }
}

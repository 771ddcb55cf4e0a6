//! In-memory vector index over one ingestion run's chunks.
//!
//! Bulk-populated once by [`VectorIndex::build`] and read-only afterwards.
//! Queries are brute-force cosine similarity over all entries — the index
//! holds a single run's chunks, so a linear scan is the right trade against
//! the bookkeeping an ANN structure would add at this scale.

use thiserror::Error;

use crate::embedding::cosine_similarity;
use crate::models::{Chunk, SearchHit};

/// Build or query input whose shape does not match the index.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DimensionMismatchError {
    #[error("entry count mismatch: {chunks} chunks but {vectors} vectors")]
    EntryCount { chunks: usize, vectors: usize },
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    Dimension { expected: usize, actual: usize },
}

/// A chunk paired with its embedding vector. Immutable once inserted.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub chunk: Chunk,
    pub vector: Vec<f32>,
}

/// Similarity index over the (chunk, vector) pairs of one ingestion run.
#[derive(Debug)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
    dims: usize,
}

impl VectorIndex {
    /// Build an index from positionally paired chunks and vectors.
    ///
    /// # Errors
    ///
    /// Fails when the two sequences differ in length, or when the vectors
    /// do not all share one dimension.
    pub fn build(
        chunks: Vec<Chunk>,
        vectors: Vec<Vec<f32>>,
    ) -> Result<Self, DimensionMismatchError> {
        if chunks.len() != vectors.len() {
            return Err(DimensionMismatchError::EntryCount {
                chunks: chunks.len(),
                vectors: vectors.len(),
            });
        }

        let dims = vectors.first().map(|v| v.len()).unwrap_or(0);
        if let Some(bad) = vectors.iter().find(|v| v.len() != dims) {
            return Err(DimensionMismatchError::Dimension {
                expected: dims,
                actual: bad.len(),
            });
        }

        let entries = chunks
            .into_iter()
            .zip(vectors)
            .map(|(chunk, vector)| IndexEntry { chunk, vector })
            .collect();

        Ok(Self { entries, dims })
    }

    /// The `min(k, len)` entries most similar to `vector`, sorted by
    /// descending cosine similarity. Ties keep insertion order.
    ///
    /// An empty index answers any query with an empty result.
    ///
    /// # Errors
    ///
    /// Fails when the query vector's dimension differs from the index's.
    pub fn query(
        &self,
        vector: &[f32],
        k: usize,
    ) -> Result<Vec<SearchHit>, DimensionMismatchError> {
        if self.entries.is_empty() {
            return Ok(Vec::new());
        }

        if vector.len() != self.dims {
            return Err(DimensionMismatchError::Dimension {
                expected: self.dims,
                actual: vector.len(),
            });
        }

        let mut hits: Vec<SearchHit> = self
            .entries
            .iter()
            .map(|entry| SearchHit {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(vector, &entry.vector),
            })
            .collect();

        // Stable sort: equal scores keep insertion order.
        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(k);

        Ok(hits)
    }

    /// All entries, in insertion order.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dimension shared by every indexed vector; zero for an empty index.
    pub fn dims(&self) -> usize {
        self.dims
    }
}

//! Core data types that flow through the ingestion and retrieval pipeline.

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

/// A single document handed to the pipeline.
///
/// Documents have no identity beyond their position in the input batch.
/// The variants mirror the byte-source types callers actually hold: a path
/// on disk, bytes already in memory, or an open reader. All variants are
/// resolved to bytes at the extraction boundary.
pub enum DocumentInput {
    /// A file on disk, read lazily during extraction.
    Path(PathBuf),
    /// Raw document bytes already in memory.
    Bytes(Vec<u8>),
    /// An open byte source, drained during extraction.
    Reader(Box<dyn Read + Send>),
}

impl DocumentInput {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        DocumentInput::Path(path.into())
    }

    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        DocumentInput::Bytes(bytes.into())
    }

    pub fn reader(reader: impl Read + Send + 'static) -> Self {
        DocumentInput::Reader(Box::new(reader))
    }
}

impl From<PathBuf> for DocumentInput {
    fn from(path: PathBuf) -> Self {
        DocumentInput::Path(path)
    }
}

impl From<&Path> for DocumentInput {
    fn from(path: &Path) -> Self {
        DocumentInput::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for DocumentInput {
    fn from(bytes: Vec<u8>) -> Self {
        DocumentInput::Bytes(bytes)
    }
}

impl fmt::Debug for DocumentInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentInput::Path(p) => f.debug_tuple("Path").field(p).finish(),
            DocumentInput::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            DocumentInput::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

/// A bounded slice of the raw text, the atomic unit for embedding and retrieval.
///
/// `start_offset` is the character offset of the chunk's text within the raw
/// text it was split from. Because segments inside a chunk are rejoined with
/// the separator that split them, every chunk's text is a literal substring
/// of the raw text starting at that offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Zero-based position in the chunk sequence.
    pub index: usize,
    /// The chunk's text content.
    pub text: String,
    /// Character offset of `text` within the raw text.
    pub start_offset: usize,
}

/// A single ranked result from a similarity query.
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// The matched chunk.
    pub chunk: Chunk,
    /// Cosine similarity between the query vector and the chunk's embedding.
    pub score: f32,
}

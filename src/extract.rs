//! Text extraction from document byte sources.
//!
//! Resolves each [`DocumentInput`] to bytes, pulls plain UTF-8 text out of
//! it (PDF via `pdf-extract`, everything else decoded as UTF-8), and
//! concatenates the results in batch order with no separator between
//! documents. Page text within a PDF is likewise concatenated in page
//! order, so document and page boundaries are not preserved in the output —
//! downstream chunking sees one continuous string.
//!
//! Extraction is fail-fast: the first document that cannot be parsed aborts
//! the whole batch with an error naming its position.

use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::models::DocumentInput;

/// Extraction failure, carrying the offending document's batch position.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("document {document}: failed to read source: {source}")]
    Io {
        document: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("document {document}: empty byte source")]
    Empty { document: usize },
    #[error("document {document}: PDF extraction failed: {message}")]
    Pdf { document: usize, message: String },
    #[error("document {document}: not valid UTF-8 text")]
    InvalidEncoding { document: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContentKind {
    Pdf,
    Text,
}

/// Extract and concatenate the text of every document, in batch order.
///
/// A parseable document with no extractable text contributes the empty
/// string and does not raise.
pub fn extract(documents: Vec<DocumentInput>) -> Result<String, ExtractionError> {
    let mut text = String::new();

    for (position, doc) in documents.into_iter().enumerate() {
        let (bytes, path) = resolve(doc, position)?;
        if bytes.is_empty() {
            return Err(ExtractionError::Empty { document: position });
        }

        let extracted = match detect(&bytes, path.as_deref()) {
            ContentKind::Pdf => extract_pdf(&bytes, position)?,
            ContentKind::Text => decode_text(bytes, position)?,
        };
        debug!(document = position, chars = extracted.len(), "extracted document");
        text.push_str(&extracted);
    }

    Ok(text)
}

/// Resolve a document input to bytes, keeping the path (if any) as a
/// content-type hint.
fn resolve(
    doc: DocumentInput,
    position: usize,
) -> Result<(Vec<u8>, Option<std::path::PathBuf>), ExtractionError> {
    match doc {
        DocumentInput::Path(path) => {
            let bytes = std::fs::read(&path).map_err(|source| ExtractionError::Io {
                document: position,
                source,
            })?;
            Ok((bytes, Some(path)))
        }
        DocumentInput::Bytes(bytes) => Ok((bytes, None)),
        DocumentInput::Reader(mut reader) => {
            let mut bytes = Vec::new();
            reader
                .read_to_end(&mut bytes)
                .map_err(|source| ExtractionError::Io {
                    document: position,
                    source,
                })?;
            Ok((bytes, None))
        }
    }
}

/// Decide how to parse the bytes: the `%PDF-` magic wins, then the path
/// extension; anything else is treated as text and validated as UTF-8.
fn detect(bytes: &[u8], path: Option<&Path>) -> ContentKind {
    if bytes.starts_with(b"%PDF-") {
        return ContentKind::Pdf;
    }
    if let Some(ext) = path.and_then(|p| p.extension()).and_then(|e| e.to_str()) {
        if ext.eq_ignore_ascii_case("pdf") {
            return ContentKind::Pdf;
        }
    }
    ContentKind::Text
}

fn extract_pdf(bytes: &[u8], position: usize) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf {
        document: position,
        message: e.to_string(),
    })
}

fn decode_text(bytes: Vec<u8>, position: usize) -> Result<String, ExtractionError> {
    String::from_utf8(bytes).map_err(|_| ExtractionError::InvalidEncoding { document: position })
}

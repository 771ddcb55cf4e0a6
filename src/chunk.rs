//! Separator-based text chunker with carried overlap.
//!
//! Splits raw text into candidate segments wherever the configured
//! separator occurs, then greedily packs consecutive segments into chunks
//! whose content stays within `chunk_size` characters. When the next
//! segment will not fit, the chunk is closed and the next one is seeded
//! with the trailing `overlap` characters of the closed chunk, so context
//! survives across chunk boundaries.
//!
//! Accounting is in characters, not bytes. Separators consumed at split
//! points do not count toward a chunk's packed size, but segments inside a
//! chunk are rejoined with the separator, which keeps every chunk's text a
//! literal substring of the input. A single segment longer than
//! `chunk_size` is kept whole rather than subdivided, so such a chunk may
//! exceed the limit.
//!
//! Splitting is a pure function of its inputs.

use crate::config::{ChunkingConfig, ConfigurationError};
use crate::models::Chunk;

/// Split `text` into an ordered sequence of overlapping chunks.
///
/// Empty input yields an empty sequence, not a single empty chunk.
///
/// # Errors
///
/// Returns [`ConfigurationError`] when `chunk_size` is zero or `overlap`
/// is not smaller than `chunk_size`.
pub fn split(text: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, ConfigurationError> {
    config.validate()?;

    if text.is_empty() {
        return Ok(Vec::new());
    }

    let separator = config.separator.as_str();

    // Segments paired with their character offset in `text`. An empty
    // separator means the whole text is one atomic segment.
    let mut segments: Vec<(usize, &str)> = Vec::new();
    if separator.is_empty() {
        segments.push((0, text));
    } else {
        let sep_chars = separator.chars().count();
        let mut cursor = 0usize;
        for seg in text.split(separator) {
            segments.push((cursor, seg));
            cursor += seg.chars().count() + sep_chars;
        }
    }

    let mut chunks: Vec<Chunk> = Vec::new();
    let mut current = String::new();
    // Packed size: carried overlap plus segment content, separators excluded.
    let mut packed = 0usize;
    let mut start = 0usize;
    let mut started = false;

    for (offset, seg) in segments {
        let seg_chars = seg.chars().count();

        if !started {
            current.push_str(seg);
            packed = seg_chars;
            start = offset;
            started = true;
            continue;
        }

        // Never close an empty chunk: with only a leading separator packed
        // so far, an oversize segment joins the open chunk instead.
        if packed + seg_chars > config.chunk_size && !current.is_empty() {
            let closed_chars = current.chars().count();
            let carry = if config.overlap > 0 {
                tail_chars(&current, config.overlap).to_string()
            } else {
                String::new()
            };

            chunks.push(Chunk {
                index: chunks.len(),
                text: std::mem::take(&mut current),
                start_offset: start,
            });

            if carry.is_empty() {
                current.push_str(seg);
                packed = seg_chars;
                start = offset;
            } else {
                let carry_chars = carry.chars().count();
                // The carry ends exactly where the closed chunk ends, and
                // the next segment follows it in the raw text, so the new
                // chunk is still a substring starting at this offset.
                start = start + closed_chars - carry_chars;
                current.push_str(&carry);
                current.push_str(separator);
                current.push_str(seg);
                packed = carry_chars + seg_chars;
            }
        } else {
            current.push_str(separator);
            current.push_str(seg);
            packed += seg_chars;
        }
    }

    if started {
        chunks.push(Chunk {
            index: chunks.len(),
            text: current,
            start_offset: start,
        });
    }

    Ok(chunks)
}

/// Last `n` characters of `s`, or all of `s` if it is shorter.
fn tail_chars(s: &str, n: usize) -> &str {
    let count = s.chars().count();
    if count <= n {
        return s;
    }
    let (idx, _) = s
        .char_indices()
        .nth(count - n)
        .expect("tail index within bounds");
    &s[idx..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(chunk_size: usize, overlap: usize, separator: &str) -> ChunkingConfig {
        ChunkingConfig {
            chunk_size,
            overlap,
            separator: separator.to_string(),
        }
    }

    #[test]
    fn reference_scenario() {
        let text = "AAAA\nBBBB\nCCCC\nDDDD";
        let chunks = split(text, &config(8, 4, "\n")).unwrap();

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["AAAA\nBBBB", "BBBB\nCCCC", "CCCC\nDDDD"]);

        let offsets: Vec<usize> = chunks.iter().map(|c| c.start_offset).collect();
        assert_eq!(offsets, vec![0, 5, 10]);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let chunks = split("", &config(100, 10, "\n")).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn overlap_not_smaller_than_chunk_size_rejected() {
        let err = split("some text", &config(100, 150, "\n")).unwrap_err();
        assert!(matches!(err, ConfigurationError::OverlapTooLarge { .. }));

        let err = split("some text", &config(100, 100, "\n")).unwrap_err();
        assert!(matches!(err, ConfigurationError::OverlapTooLarge { .. }));
    }

    #[test]
    fn zero_chunk_size_rejected() {
        let err = split("some text", &config(0, 0, "\n")).unwrap_err();
        assert_eq!(err, ConfigurationError::ZeroChunkSize);
    }

    #[test]
    fn small_text_is_a_single_chunk() {
        let chunks = split("hello world", &config(100, 10, "\n")).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "hello world");
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[0].start_offset, 0);
    }

    #[test]
    fn oversize_atomic_segment_is_not_subdivided() {
        let text = "tiny\nAAAAAAAAAAAAAAAAAAAA\ntiny";
        let chunks = split(text, &config(8, 2, "\n")).unwrap();

        // The 20-char segment survives whole inside one chunk.
        assert!(chunks.iter().any(|c| c.text.contains("AAAAAAAAAAAAAAAAAAAA")));
    }

    #[test]
    fn packed_size_never_exceeds_chunk_size_without_oversize_segments() {
        let text = (0..40)
            .map(|i| format!("word{i:02}"))
            .collect::<Vec<_>>()
            .join(" ");
        let cfg = config(30, 6, " ");
        let chunks = split(&text, &cfg).unwrap();

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            // Content accounting excludes separators inside the chunk.
            let separators = chunk.text.matches(' ').count();
            let packed = chunk.text.chars().count() - separators;
            assert!(
                packed <= cfg.chunk_size,
                "chunk {} packs {} chars",
                chunk.index,
                packed
            );
        }
    }

    #[test]
    fn consecutive_chunks_carry_overlap() {
        let text = (0..40)
            .map(|i| format!("word{i:02}"))
            .collect::<Vec<_>>()
            .join(" ");
        let cfg = config(30, 6, " ");
        let chunks = split(&text, &cfg).unwrap();

        for pair in chunks.windows(2) {
            let tail: String = pair[0]
                .text
                .chars()
                .skip(pair[0].text.chars().count() - cfg.overlap)
                .collect();
            let head: String = pair[1].text.chars().take(cfg.overlap).collect();
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn zero_overlap_produces_no_carry() {
        let text = "AAAA\nBBBB\nCCCC\nDDDD";
        let chunks = split(text, &config(8, 0, "\n")).unwrap();

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["AAAA\nBBBB", "CCCC\nDDDD"]);
        assert_eq!(chunks[1].start_offset, 10);
    }

    #[test]
    fn chunks_are_substrings_at_their_offsets() {
        let text = "AAAA\nBBBB\nCCCC\nDDDD";
        let chunks = split(text, &config(8, 4, "\n")).unwrap();

        for chunk in &chunks {
            let window: String = text
                .chars()
                .skip(chunk.start_offset)
                .take(chunk.text.chars().count())
                .collect();
            assert_eq!(window, chunk.text);
        }
    }

    #[test]
    fn split_is_pure() {
        let text = "alpha\nbeta\ngamma\ndelta\nepsilon";
        let cfg = config(12, 5, "\n");
        assert_eq!(split(text, &cfg).unwrap(), split(text, &cfg).unwrap());
    }

    #[test]
    fn indices_are_contiguous_from_zero() {
        let text = (0..50)
            .map(|i| format!("segment number {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let chunks = split(&text, &config(40, 10, "\n")).unwrap();
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
        }
    }

    #[test]
    fn multi_char_separator() {
        let text = "one--two--three--four";
        let chunks = split(text, &config(8, 3, "--")).unwrap();

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            let window: String = text
                .chars()
                .skip(chunk.start_offset)
                .take(chunk.text.chars().count())
                .collect();
            assert_eq!(window, chunk.text);
        }
    }

    #[test]
    fn non_ascii_text_counts_characters_not_bytes() {
        let text = "ééééé\nüüüüü\nööööö";
        let chunks = split(text, &config(10, 5, "\n")).unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "ééééé\nüüüüü");
        assert_eq!(chunks[1].text, "üüüüü\nööööö");
        assert_eq!(chunks[1].start_offset, 6);
    }

    #[test]
    fn text_without_separator_is_one_chunk() {
        let text = "a".repeat(50);
        let chunks = split(&text, &config(8, 2, "\n")).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, text);
    }
}

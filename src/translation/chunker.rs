/*!
 * Line-preserving chunker.
 *
 * Splits arbitrary text into segments no longer than a maximum length so
 * that each one fits the translation backend's input limit. Lines are the
 * unit of accumulation and are never split; a line that is longer than the
 * limit on its own becomes a single oversized chunk.
 */

use crate::document::Document;

/// Accumulates lines into bounded chunks
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    /// Maximum characters per chunk
    max_length: usize,
}

impl Chunker {
    /// Create a chunker with the given maximum chunk length (in characters)
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    /// Split a document into trimmed, non-empty chunks in source order
    pub fn split(&self, document: &Document) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut buffer = String::new();
        // Character count of `buffer`, kept alongside so lengths are not recounted
        let mut buffer_len = 0usize;

        for line in document.lines() {
            let line_len = line.chars().count();
            if buffer_len + line_len + 1 > self.max_length {
                flush(&mut chunks, &buffer);
                buffer.clear();
                buffer.push_str(line);
                buffer_len = line_len;
            } else {
                buffer.push(' ');
                buffer.push_str(line);
                buffer_len += line_len + 1;
            }
        }
        flush(&mut chunks, &buffer);

        chunks
    }
}

/// Push the trimmed buffer as a chunk unless it trims to nothing
fn flush(chunks: &mut Vec<String>, buffer: &str) {
    let trimmed = buffer.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

/// Split `text` into chunks of at most `max_length` characters
pub fn chunk_text(text: &str, max_length: usize) -> Vec<String> {
    Chunker::new(max_length).split(&Document::from_text(text))
}

/*!
 * Property tests for chunking and reassembly
 */

use traductor::document::Document;
use traductor::translation::{Chunker, chunk_text, reassemble};

fn without_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// With an identity backend the reassembled output keeps every visible character
#[test]
fn test_identityRoundTrip_withManyLines_shouldPreserveContent() {
    let text = (1..=40)
        .map(|i| format!("  Línea {} del documento, con acentos: á é í ó ú ñ.  ", i))
        .collect::<Vec<_>>()
        .join("\n");

    let chunks = chunk_text(&text, 120);
    let output = reassemble(&chunks);

    assert_eq!(without_whitespace(&output), without_whitespace(&text));
}

/// Lines are joined with spaces inside a chunk and chunks with blank lines
#[test]
fn test_identityRoundTrip_shouldJoinLinesWithSpacesAndChunksWithBlankLines() {
    let chunks = chunk_text("uno\ndos\ntres\ncuatro", 9);
    assert_eq!(chunks, vec!["uno dos", "tres", "cuatro"]);
    assert_eq!(reassemble(&chunks), "uno dos\n\ntres\n\ncuatro");
}

/// A single line longer than the limit becomes exactly one chunk
#[test]
fn test_chunkText_withSingleOverlongLine_shouldReturnTrimmedLine() {
    let line = "palabra ".repeat(100);
    let chunks = chunk_text(&line, 450);
    assert_eq!(chunks, vec![line.trim().to_string()]);
}

/// Blank input produces no chunks at all
#[test]
fn test_chunkText_withBlankInput_shouldReturnNothing() {
    assert!(chunk_text("", 450).is_empty());
    assert!(chunk_text("\n\n   \r\n", 450).is_empty());
}

/// Every Unicode line boundary splits lines the same way
#[test]
fn test_chunker_withMixedLineBreaks_shouldTreatThemAlike() {
    let chunker = Chunker::new(450);
    let unix = chunker.split(&Document::from_text("a\nb\nc"));
    let mixed = chunker.split(&Document::from_text("a\r\nb\u{2028}c"));
    assert_eq!(unix, mixed);
}

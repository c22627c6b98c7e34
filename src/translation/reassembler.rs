/*!
 * Joins translated chunks back into one document.
 */

/// Separator placed between translated chunks; export adapters split on it again
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Join translated chunks in order, one paragraph per chunk
pub fn reassemble<S: AsRef<str>>(chunks: &[S]) -> String {
    chunks.iter().map(AsRef::as_ref).collect::<Vec<&str>>().join(PARAGRAPH_SEPARATOR)
}

/// Split a reassembled document back into its paragraphs
pub fn paragraphs(text: &str) -> Vec<&str> {
    text.split(PARAGRAPH_SEPARATOR).collect()
}

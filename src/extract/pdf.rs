/*!
 * PDF text extraction.
 *
 * Text is pulled page by page. A page whose content cannot be decoded, or
 * that carries no text at all (scans), is skipped instead of failing the
 * whole upload; only a file that cannot be parsed as a PDF is an error.
 */

use log::{debug, warn};
use lopdf::Document as PdfDocument;

use crate::errors::ExtractionError;

/// Extract the text of every readable page, each followed by a newline
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let document = PdfDocument::load_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    let pages = document.get_pages();
    let mut text = String::new();
    let mut skipped = 0;

    for page_number in pages.keys() {
        match document.extract_text(&[*page_number]) {
            Ok(page_text) if !page_text.is_empty() => {
                text.push_str(&page_text);
                text.push('\n');
            }
            Ok(_) => skipped += 1,
            Err(e) => {
                warn!("Skipping unreadable PDF page {}: {}", page_number, e);
                skipped += 1;
            }
        }
    }

    debug!("Extracted text from {} of {} PDF pages", pages.len() - skipped, pages.len());
    Ok(text)
}

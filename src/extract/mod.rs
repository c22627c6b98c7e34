/*!
 * Upload extraction.
 *
 * Each accepted input kind is turned into either plain text (text files and
 * PDFs) or a table (spreadsheets):
 * - `text`: UTF-8 decoding
 * - `spreadsheet`: first worksheet of an `.xlsx` workbook
 * - `pdf`: per-page text extraction
 */

use crate::document::{InputKind, Table};
use crate::errors::ExtractionError;

pub mod pdf;
pub mod spreadsheet;
pub mod text;

/// What an upload turned into
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    /// Free text, translated as one document
    Text(String),
    /// A spreadsheet, translated cell by cell
    Table(Table),
}

/// Extract the content of an upload of the given kind
pub fn extract(kind: InputKind, bytes: &[u8]) -> Result<Extracted, ExtractionError> {
    match kind {
        InputKind::PlainText => text::decode(bytes).map(Extracted::Text),
        InputKind::Spreadsheet => spreadsheet::read_table(bytes).map(Extracted::Table),
        InputKind::Pdf => pdf::extract_text(bytes).map(Extracted::Text),
    }
}

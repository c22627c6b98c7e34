/*!
 * Request-scoped data model.
 *
 * - `Document`: the ordered lines of one piece of source text
 * - `Table`: a spreadsheet as named columns and rows of cells
 * - `InputKind`: the three upload kinds the tool accepts
 */

use std::fmt;
use std::path::Path;

use crate::errors::ExtractionError;

/// Returns true for the characters Unicode treats as line boundaries
fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split text into lines on every Unicode line boundary, treating `\r\n` as one.
///
/// A trailing boundary does not produce a final empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        if !is_line_boundary(c) {
            continue;
        }
        lines.push(&text[start..index]);
        let mut end = index + c.len_utf8();
        if c == '\r' {
            if let Some(&(next_index, '\n')) = chars.peek() {
                chars.next();
                end = next_index + 1;
            }
        }
        start = end;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// An immutable sequence of source lines
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Build a document from raw text
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: split_lines(text).into_iter().map(str::to_string).collect(),
        }
    }

    /// The lines in source order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// True when the document holds nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }
}

/// The upload kinds the tool knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    PlainText,
    Spreadsheet,
    Pdf,
}

impl InputKind {
    /// Map a declared MIME type to an input kind
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_lowercase().as_str() {
            "text/plain" => Some(Self::PlainText),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => Some(Self::Spreadsheet),
            "application/pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Map a file extension (with or without the dot) to an input kind
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.trim_start_matches('.').to_lowercase().as_str() {
            "txt" => Some(Self::PlainText),
            "xlsx" => Some(Self::Spreadsheet),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Detect the kind of an upload from its file name
    pub fn detect(path: &Path) -> Result<Self, ExtractionError> {
        path.extension()
            .and_then(|ext| Self::from_extension(&ext.to_string_lossy()))
            .ok_or_else(|| ExtractionError::UnsupportedKind(path.display().to_string()))
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PlainText => "txt",
            Self::Spreadsheet => "xlsx",
            Self::Pdf => "pdf",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for InputKind {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s)
            .or_else(|| Self::from_mime(s))
            .ok_or_else(|| ExtractionError::UnsupportedKind(s.to_string()))
    }
}

/// One spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// A value kept verbatim and never translated (dates, error codes)
    Literal(String),
    Empty,
}

impl CellValue {
    /// The text of a string cell that carries something to translate
    pub fn translatable_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) if !text.trim().is_empty() => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(text) => write!(f, "{}", text),
            CellValue::Int(value) => write!(f, "{}", value),
            CellValue::Float(value) => write!(f, "{}", value),
            CellValue::Bool(value) => write!(f, "{}", value),
            CellValue::Literal(value) => write!(f, "{}", value),
            CellValue::Empty => Ok(()),
        }
    }
}

/// A spreadsheet: one header row of column names followed by data rows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Column names from the first row
    pub columns: Vec<String>,
    /// Data rows, each padded to the column count
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table, padding short rows with empty cells
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).chain(std::iter::once(columns.len())).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Number of cells that will be sent to the translator
    pub fn translatable_cell_count(&self) -> usize {
        self.rows.iter().flatten().filter(|cell| cell.translatable_text().is_some()).count()
    }

    /// Tab-separated preview of the header and the first `limit` rows
    pub fn preview(&self, limit: usize) -> String {
        let mut lines = vec![self.columns.join("\t")];
        lines.extend(self.rows.iter().take(limit).map(|row| {
            row.iter().map(ToString::to_string).collect::<Vec<_>>().join("\t")
        }));
        lines.join("\n")
    }
}

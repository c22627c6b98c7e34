/*!
 * Download artifacts.
 *
 * Every translation is rendered into the artifacts the user can download:
 * - `text`: the translation as UTF-8 bytes
 * - `docx`: a Word document, one paragraph per translated paragraph or row
 * - `xlsx`: a workbook with the same shape as the uploaded one
 *
 * The Office formats are written as minimal OOXML packages.
 */

use std::fmt;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::document::Table;
use crate::errors::ExportError;

pub mod docx;
pub mod text;
pub mod xlsx;

/// The artifact formats offered for download
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    PlainText,
    Word,
    Spreadsheet,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::PlainText => "TXT",
            Self::Word => "Word",
            Self::Spreadsheet => "XLSX",
        };
        write!(f, "{}", label)
    }
}

/// An artifact rendered in memory, ready to be written out
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedArtifact {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Render a translated text as `<stem>.txt` and `<stem>.docx`
pub fn render_text(stem: &str, translated: &str) -> Result<Vec<RenderedArtifact>, ExportError> {
    Ok(vec![
        RenderedArtifact {
            kind: ArtifactKind::PlainText,
            file_name: format!("{}.txt", stem),
            bytes: text::to_bytes(translated),
        },
        RenderedArtifact {
            kind: ArtifactKind::Word,
            file_name: format!("{}.docx", stem),
            bytes: docx::from_text(translated)?,
        },
    ])
}

/// Render a translated table as `translated.xlsx` and `translated.xlsx.docx`
pub fn render_table(translated: &Table) -> Result<Vec<RenderedArtifact>, ExportError> {
    Ok(vec![
        RenderedArtifact {
            kind: ArtifactKind::Spreadsheet,
            file_name: "translated.xlsx".to_string(),
            bytes: xlsx::from_table(translated)?,
        },
        RenderedArtifact {
            kind: ArtifactKind::Word,
            file_name: "translated.xlsx.docx".to_string(),
            bytes: docx::from_table(translated)?,
        },
    ])
}

/// Zip `(path, content)` parts into an OOXML package
pub(crate) fn write_package(parts: &[(&str, String)]) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut writer = ZipWriter::new(&mut buffer);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, content) in parts {
            writer.start_file(*name, options)?;
            writer.write_all(content.as_bytes())?;
        }
        writer.finish()?;
    }
    Ok(buffer.into_inner())
}

/// Drop characters XML 1.0 cannot carry, keeping tabs and line breaks
pub(crate) fn xml_safe(text: &str) -> String {
    text.chars()
        .filter(|c| matches!(c, '\t' | '\n' | '\r') || !c.is_control() || (*c as u32) >= 0x80)
        .filter(|c| !matches!(*c as u32, 0xFFFE | 0xFFFF))
        .collect()
}

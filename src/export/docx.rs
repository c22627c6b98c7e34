/*!
 * Word (`.docx`) rendering.
 *
 * Each paragraph becomes one `<w:p>` with a single run. Inside a run tabs
 * become `<w:tab/>` and line breaks `<w:br/>`, which is how Word itself
 * stores them.
 */

use quick_xml::escape::escape;

use super::{write_package, xml_safe};
use crate::document::Table;
use crate::errors::ExportError;
use crate::translation::reassembler;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_HEAD: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;

const DOCUMENT_TAIL: &str = "<w:sectPr/></w:body></w:document>";

/// One paragraph per `"\n\n"`-separated segment of `text`
pub fn from_text(text: &str) -> Result<Vec<u8>, ExportError> {
    from_paragraphs(reassembler::paragraphs(text))
}

/// One paragraph per data row, cells joined by tabs
pub fn from_table(table: &Table) -> Result<Vec<u8>, ExportError> {
    let rows: Vec<String> = table
        .rows
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect::<Vec<_>>().join("\t"))
        .collect();
    from_paragraphs(rows.iter().map(String::as_str))
}

/// Build a document holding the given paragraphs in order
pub fn from_paragraphs<'a, I>(paragraphs: I) -> Result<Vec<u8>, ExportError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut body = String::from(DOCUMENT_HEAD);
    for paragraph in paragraphs {
        body.push_str(&paragraph_xml(paragraph));
    }
    body.push_str(DOCUMENT_TAIL);

    write_package(&[
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("word/document.xml", body),
    ])
}

/// Move buffered text into the run as one `<w:t>` element
fn flush_text(run: &mut String, pending: &mut String) {
    if !pending.is_empty() {
        run.push_str(&format!(r#"<w:t xml:space="preserve">{}</w:t>"#, escape(pending.as_str())));
        pending.clear();
    }
}

fn paragraph_xml(paragraph: &str) -> String {
    let text = xml_safe(paragraph);
    let mut run = String::new();
    let mut pending = String::new();

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\t' => {
                flush_text(&mut run, &mut pending);
                run.push_str("<w:tab/>");
            }
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                flush_text(&mut run, &mut pending);
                run.push_str("<w:br/>");
            }
            other => pending.push(other),
        }
    }
    flush_text(&mut run, &mut pending);

    if run.is_empty() {
        "<w:p/>".to_string()
    } else {
        format!("<w:p><w:r>{}</w:r></w:p>", run)
    }
}

/*!
 * Spreadsheet (`.xlsx`) rendering.
 *
 * Writes a single worksheet named `Sheet1`: the column names in the first
 * row, then the data rows. Strings are stored inline so no shared-strings
 * part is needed. Empty cells are omitted.
 */

use quick_xml::escape::escape;

use super::{write_package, xml_safe};
use crate::document::{CellValue, Table};
use crate::errors::ExportError;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

/// Render `table` as a workbook
pub fn from_table(table: &Table) -> Result<Vec<u8>, ExportError> {
    let mut sheet = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    let header: Vec<CellValue> = table.columns.iter().cloned().map(CellValue::Text).collect();
    for (index, row) in std::iter::once(&header).chain(table.rows.iter()).enumerate() {
        let row_number = index + 1;
        sheet.push_str(&format!(r#"<row r="{}">"#, row_number));
        for (column, cell) in row.iter().enumerate() {
            sheet.push_str(&cell_xml(&format!("{}{}", column_letters(column), row_number), cell));
        }
        sheet.push_str("</row>");
    }
    sheet.push_str("</sheetData></worksheet>");

    write_package(&[
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("xl/workbook.xml", WORKBOOK.to_string()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
        ("xl/worksheets/sheet1.xml", sheet),
    ])
}

/// Spreadsheet column name for a zero-based index: 0 is `A`, 26 is `AA`
pub fn column_letters(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

fn inline_string(reference: &str, text: &str) -> String {
    format!(
        r#"<c r="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
        reference,
        escape(xml_safe(text).as_str())
    )
}

fn cell_xml(reference: &str, cell: &CellValue) -> String {
    match cell {
        CellValue::Text(text) | CellValue::Literal(text) => inline_string(reference, text),
        CellValue::Int(value) => format!(r#"<c r="{}"><v>{}</v></c>"#, reference, value),
        CellValue::Float(value) if value.is_finite() => {
            format!(r#"<c r="{}"><v>{}</v></c>"#, reference, value)
        }
        CellValue::Float(value) => inline_string(reference, &value.to_string()),
        CellValue::Bool(value) => format!(r#"<c r="{}" t="b"><v>{}</v></c>"#, reference, u8::from(*value)),
        CellValue::Empty => String::new(),
    }
}

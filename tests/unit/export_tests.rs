/*!
 * Tests for the download artifacts, read back with independent readers
 */

use anyhow::Result;
use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
use std::io::{Cursor, Read};
use traductor::document::{CellValue, Table};
use traductor::export::{docx, xlsx};

fn document_xml(bytes: Vec<u8>) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name("word/document.xml")?.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Each blank-line separated segment becomes its own paragraph
#[test]
fn test_docxFromText_shouldWriteOneParagraphPerSegment() -> Result<()> {
    let xml = document_xml(docx::from_text("Hello\n\nworld & more")?)?;
    assert_eq!(xml.matches("<w:p>").count(), 2);
    assert!(xml.contains(">Hello<"));
    assert!(xml.contains("world &amp; more"));
    Ok(())
}

/// The package carries the parts Word needs to open it
#[test]
fn test_docx_shouldContainContentTypesAndRelationships() -> Result<()> {
    let bytes = docx::from_text("Hello")?;
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    assert!(archive.by_name("[Content_Types].xml").is_ok());
    assert!(archive.by_name("_rels/.rels").is_ok());
    Ok(())
}

/// A rendered workbook reads back with the same header and values
#[test]
fn test_xlsxFromTable_shouldReadBackWithCalamine() -> Result<()> {
    let table = Table::new(
        vec!["texto".into(), "numero".into(), "activo".into()],
        vec![
            vec![CellValue::Text("Hello <world>".into()), CellValue::Int(42), CellValue::Bool(true)],
            vec![CellValue::Empty, CellValue::Float(2.5), CellValue::Bool(false)],
        ],
    );

    let bytes = xlsx::from_table(&table)?;
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    let range = workbook.worksheet_range_at(0).expect("one sheet")?;

    assert_eq!(range.get_value((0, 0)), Some(&Data::String("texto".into())));
    assert_eq!(range.get_value((1, 0)), Some(&Data::String("Hello <world>".into())));
    assert_eq!(range.get_value((1, 1)), Some(&Data::Float(42.0)));
    assert_eq!(range.get_value((1, 2)), Some(&Data::Bool(true)));
    assert_eq!(range.get_value((2, 1)), Some(&Data::Float(2.5)));
    assert_eq!(range.height(), 3);
    Ok(())
}

/*!
 * End-to-end tests for spreadsheet uploads
 */

use anyhow::Result;
use calamine::{Data, Reader, Xlsx, open_workbook};
use traductor::document::{CellValue, InputKind, Table};
use crate::common::{self, fixtures};

fn sample_table() -> Table {
    Table::new(
        vec!["texto".into(), "cantidad".into(), "nota".into()],
        vec![vec![
            CellValue::Text("Hola".into()),
            CellValue::Int(42),
            CellValue::Empty,
        ]],
    )
}

/// Only text cells reach the backend; numbers and blanks are kept
#[tokio::test]
async fn test_uploadFile_withWorkbook_shouldTranslateTextCellsOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "datos.xlsx",
        &fixtures::workbook_bytes(&sample_table()),
    )?;
    let output_dir = temp_dir.path().join("salida");
    let engine = common::dictionary_engine();
    let controller = common::controller_with(&engine, common::test_config(&output_dir));

    let outcome = controller.upload_file(&input, None).await?;

    assert_eq!(outcome.input_kind, Some(InputKind::Spreadsheet));
    assert_eq!(engine.received(), vec!["Hola"]);

    let mut workbook: Xlsx<_> = open_workbook(output_dir.join("translated.xlsx"))?;
    let range = workbook.worksheet_range_at(0).expect("one sheet")?;
    assert_eq!(range.get_value((0, 0)), Some(&Data::String("texto".into())));
    assert_eq!(range.get_value((1, 0)), Some(&Data::String("Hello".into())));
    assert_eq!(range.get_value((1, 1)), Some(&Data::Float(42.0)));
    assert!(output_dir.join("translated.xlsx.docx").exists());
    Ok(())
}

/// Previews show at most five data rows
#[tokio::test]
async fn test_uploadFile_withManyRows_shouldPreviewFiveRows() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let rows = (0..8).map(|_| vec![CellValue::Text("gato".into())]).collect();
    let table = Table::new(vec!["animal".into()], rows);
    let input = common::create_test_file(temp_dir.path(), "animales.xlsx", &fixtures::workbook_bytes(&table))?;
    let engine = common::dictionary_engine();
    let controller = common::controller_with(&engine, common::test_config(temp_dir.path()));

    let outcome = controller.upload_file(&input, None).await?;

    assert_eq!(outcome.translated_preview.matches("cat").count(), 5);
    assert_eq!(outcome.original_preview.matches("gato").count(), 5);
    // Identical cells within one upload reach the backend once
    assert_eq!(engine.calls(), 1);
    Ok(())
}

/// A file that is not a workbook fails without writing artifacts
#[tokio::test]
async fn test_uploadFile_withCorruptWorkbook_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "roto.xlsx", b"not a zip archive")?;
    let engine = common::dictionary_engine();
    let controller = common::controller_with(&engine, common::test_config(temp_dir.path()));

    let result = controller.upload_file(&input, None).await;

    assert!(matches!(result, Err(traductor::AppError::Extraction(_))));
    assert!(!temp_dir.path().join("translated.xlsx").exists());
    Ok(())
}

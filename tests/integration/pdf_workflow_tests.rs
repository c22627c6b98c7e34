/*!
 * End-to-end tests for PDF uploads
 */

use anyhow::Result;
use traductor::document::InputKind;
use traductor::providers::mock::MockEngine;
use crate::common::{self, fixtures};

/// Page text is extracted, translated and written as `translated_pdf.*`
#[tokio::test]
async fn test_uploadFile_withPdf_shouldWritePdfArtifacts() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "carta.pdf",
        &fixtures::pdf_bytes(&["Hello World", "", "Second page"]),
    )?;
    let engine = MockEngine::echo();
    let controller = common::controller_with(&engine, common::test_config(temp_dir.path()));

    let outcome = controller.upload_file(&input, None).await?;

    assert_eq!(outcome.input_kind, Some(InputKind::Pdf));
    assert!(outcome.original_preview.contains("Hello"));
    assert!(outcome.translated_preview.contains("World"));
    assert!(outcome.translated_preview.contains("Second"));
    assert!(temp_dir.path().join("translated_pdf.txt").exists());
    assert!(temp_dir.path().join("translated_pdf.docx").exists());
    Ok(())
}

/// The original preview is capped at 1000 characters
#[tokio::test]
async fn test_uploadFile_withLongPdf_shouldCapOriginalPreview() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let line = "Texto largo del documento ".repeat(20);
    let pages: Vec<&str> = (0..5).map(|_| line.as_str()).collect();
    let input = common::create_test_file(temp_dir.path(), "largo.pdf", &fixtures::pdf_bytes(&pages))?;
    let engine = MockEngine::echo();
    let controller = common::controller_with(&engine, common::test_config(temp_dir.path()));

    let outcome = controller.upload_file(&input, None).await?;

    assert_eq!(outcome.original_preview.chars().count(), 1000);
    Ok(())
}

/// Bytes that are not a PDF surface as an extraction error
#[tokio::test]
async fn test_uploadFile_withGarbagePdf_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "roto.pdf", b"%PDF-garbage")?;
    let engine = MockEngine::echo();
    let controller = common::controller_with(&engine, common::test_config(temp_dir.path()));

    let result = controller.upload_file(&input, None).await;

    assert!(matches!(result, Err(traductor::AppError::Extraction(_))));
    assert_eq!(engine.calls(), 0);
    Ok(())
}

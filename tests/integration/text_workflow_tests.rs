/*!
 * End-to-end tests for typed text and .txt uploads
 */

use anyhow::Result;
use traductor::app_controller::Controller;
use traductor::document::InputKind;
use traductor::export::ArtifactKind;
use traductor::providers::mock::MockEngine;
use crate::common;

/// Typed text produces the canvas artifacts holding the translation
#[tokio::test]
async fn test_submitText_withSpanishText_shouldWriteCanvasArtifacts() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let engine = common::dictionary_engine();
    let controller = common::controller_with(&engine, common::test_config(temp_dir.path()));

    let outcome = controller.submit_text("Hola mundo").await?.expect("non-blank text is translated");

    assert_eq!(outcome.translated_preview, "Hello world");
    assert_eq!(outcome.input_kind, None);
    let names: Vec<_> = outcome.artifacts.iter().map(|a| a.file_name.as_str()).collect();
    assert_eq!(names, vec!["translated_canvas.txt", "translated_canvas.docx"]);
    assert_eq!(std::fs::read_to_string(temp_dir.path().join("translated_canvas.txt"))?, "Hello world");
    assert_eq!(outcome.artifacts[1].kind, ArtifactKind::Word);
    Ok(())
}

/// Blank text is rejected before the backend is involved
#[tokio::test]
async fn test_submitText_withBlankText_shouldSkipBackend() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let engine = common::dictionary_engine();
    let controller = common::controller_with(&engine, common::test_config(temp_dir.path()));

    assert!(controller.submit_text("   \n\t").await?.is_none());
    assert_eq!(engine.calls(), 0);
    assert!(!temp_dir.path().join("translated_canvas.txt").exists());
    Ok(())
}

/// Nothing translated in one request is reused by the next
#[tokio::test]
async fn test_submitText_withRepeatedText_shouldReachBackendEveryRequest() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let engine = common::dictionary_engine();
    let controller = common::controller_with(&engine, common::test_config(temp_dir.path()));

    controller.submit_text("Hola mundo").await?;
    controller.submit_text("Hola mundo").await?;
    for i in 0..20 {
        controller.submit_text(&format!("gato {}", i)).await?;
    }

    assert_eq!(engine.calls(), 22);
    Ok(())
}

/// Lines that do not fit one chunk come back as separate paragraphs
#[tokio::test]
async fn test_submitText_withSmallChunkLimit_shouldSeparateChunksWithBlankLine() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let engine = common::dictionary_engine();
    let mut config = common::test_config(temp_dir.path());
    config.chunking.max_chunk_length = 5;
    let controller = common::controller_with(&engine, config);

    let outcome = controller.submit_text("Hola\nmundo").await?.expect("translated");

    assert_eq!(outcome.translated_preview, "Hello\n\nworld");
    assert_eq!(engine.received(), vec!["Hola", "mundo"]);
    Ok(())
}

/// A text upload keeps the original for display and writes `translated.*`
#[tokio::test]
async fn test_uploadFile_withTxtFile_shouldWriteTranslatedArtifacts() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "carta.txt", "\u{feff}Buenos dias\ngato".as_bytes())?;
    let engine = common::dictionary_engine();
    let controller = common::controller_with(&engine, common::test_config(&temp_dir.path().join("salida")));

    let outcome = controller.upload_file(&input, None).await?;

    assert_eq!(outcome.input_kind, Some(InputKind::PlainText));
    assert_eq!(outcome.original_preview, "Buenos dias\ngato");
    assert_eq!(outcome.translated_preview, "Good morning cat");
    let written = std::fs::read_to_string(temp_dir.path().join("salida").join("translated.txt"))?;
    assert_eq!(written, "Good morning cat");
    assert!(temp_dir.path().join("salida").join("translated.docx").exists());
    Ok(())
}

/// A backend failure still yields artifacts, holding placeholders
#[tokio::test]
async fn test_submitText_withFailingBackend_shouldWritePlaceholders() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let engine = MockEngine::failing();
    let controller = common::controller_with(&engine, common::test_config(temp_dir.path()));

    let outcome = controller.submit_text("Hola mundo").await?.expect("translated");

    assert!(outcome.translated_preview.starts_with("[Translation error: "));
    assert_eq!(outcome.artifacts.len(), 2);
    Ok(())
}

/// Invalid UTF-8 is an extraction error and writes nothing
#[tokio::test]
async fn test_uploadFile_withInvalidUtf8_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "roto.txt", &[0x48, 0x6f, 0xff, 0x6c])?;
    let engine = common::dictionary_engine();
    let controller: Controller = common::controller_with(&engine, common::test_config(temp_dir.path()));

    let result = controller.upload_file(&input, None).await;

    assert!(matches!(result, Err(traductor::AppError::Extraction(_))));
    assert_eq!(engine.calls(), 0);
    assert!(!temp_dir.path().join("translated.txt").exists());
    Ok(())
}

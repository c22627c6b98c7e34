/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use traductor::document::InputKind;
use traductor::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_fileExists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "nota.txt", b"hola")?;
    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));
    Ok(())
}

/// Test that ensure_dir creates nested directories
#[test]
fn test_ensureDir_withNestedPath_shouldCreateAll() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b");
    FileManager::ensure_dir(&nested)?;
    assert!(FileManager::dir_exists(&nested));
    Ok(())
}

/// Artifacts land at the requested path with the exact bytes
#[test]
fn test_writeBytes_shouldWriteExactContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = FileManager::write_bytes(temp_dir.path().join("translated.txt"), "Good morning".as_bytes())?;
    assert_eq!(std::fs::read_to_string(path)?, "Good morning");
    Ok(())
}

/// Kinds come from the extension unless one is declared
#[test]
fn test_detectInputKind_shouldHonourExtensionAndDeclaration() -> Result<()> {
    assert_eq!(FileManager::detect_input_kind("informe.PDF", None)?, InputKind::Pdf);
    assert_eq!(FileManager::detect_input_kind("informe", Some("xlsx"))?, InputKind::Spreadsheet);
    assert!(FileManager::detect_input_kind("informe.docx", None).is_err());
    Ok(())
}

/*!
 * Tests for configuration loading and validation
 */

use anyhow::Result;
use traductor::app_config::{Config, TranslationProvider};
use crate::common;

/// A missing config file is created with the defaults
#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config.chunking.max_chunk_length, 450);
    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded.translation.provider, TranslationProvider::LibreTranslate);
    Ok(())
}

/// Only the Spanish to English pair is accepted
#[test]
fn test_validate_withOtherLanguagePair_shouldFail() {
    let mut config = Config::default();
    config.target_language = "fr".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.source_language = "spa".to_string();
    config.target_language = "eng".to_string();
    assert!(config.validate().is_ok());
}

/// Zero limits are rejected
#[test]
fn test_validate_withZeroLimits_shouldFail() {
    let mut config = Config::default();
    config.chunking.max_chunk_length = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.chunking.max_generation_length = 0;
    assert!(config.validate().is_err());
}

/// The mock provider needs no endpoint
#[test]
fn test_validate_withMockProviderAndNoEndpoint_shouldPass() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Mock;
    config.translation.available_providers.clear();
    assert!(config.validate().is_ok());
}

/// A malformed file is reported instead of being overwritten
#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", b"{ not json")?;
    assert!(Config::load_or_create(&path).is_err());
    assert_eq!(std::fs::read(&path)?, b"{ not json");
    Ok(())
}

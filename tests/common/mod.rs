/*!
 * Common test utilities for the traductor test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use traductor::app_config::Config;
use traductor::app_controller::Controller;
use traductor::providers::mock::MockEngine;
use traductor::translation::{EngineHandle, TranslationEngine};

// Re-export the fixture builders
pub mod fixtures;

/// Routes library logs to the test output; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &[u8]) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// The stub dictionary used across the suite
pub fn dictionary_engine() -> MockEngine {
    MockEngine::dictionary([
        ("Hola", "Hello"),
        ("mundo", "world"),
        ("Buenos", "Good"),
        ("dias", "morning"),
        ("gato", "cat"),
    ])
}

/// A config writing artifacts to `output_dir`
pub fn test_config(output_dir: &Path) -> Config {
    let mut config = Config::default();
    config.output.directory = output_dir.to_path_buf();
    config
}

/// A controller whose engine is `engine`, writing to `output_dir`
pub fn controller_with(engine: &MockEngine, config: Config) -> Controller {
    let engine: Arc<dyn TranslationEngine> = Arc::new(engine.clone());
    Controller::with_engine(config, Arc::new(EngineHandle::preloaded(engine)))
}

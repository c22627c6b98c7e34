/*!
 * Tests for the lifetime of the shared translation engine
 */

use anyhow::Result;
use traductor::app_config::TranslationProvider;
use traductor::app_controller::Controller;
use traductor::translation::TranslationEngine;
use crate::common;

/// The engine is built on the first request and reused afterwards
#[tokio::test]
async fn test_controller_withSeveralRequests_shouldBuildEngineOnce() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = common::test_config(temp_dir.path());
    config.translation.provider = TranslationProvider::Mock;
    let controller = Controller::with_config(config);

    assert!(!controller.pipeline().engine().is_initialized());
    controller.submit_text("Hola").await?;
    controller.submit_text("mundo").await?;

    assert!(controller.pipeline().engine().is_initialized());
    assert_eq!(controller.pipeline().engine().construction_count(), 1);
    Ok(())
}

/// Blank input never loads the engine
#[tokio::test]
async fn test_controller_withBlankRequest_shouldNotBuildEngine() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = common::test_config(temp_dir.path());
    config.translation.provider = TranslationProvider::Mock;
    let controller = Controller::with_config(config);

    controller.submit_text("  ").await?;

    assert_eq!(controller.pipeline().engine().construction_count(), 0);
    Ok(())
}

/// An unreachable engine fails closed and is retried on the next request
#[tokio::test]
async fn test_controller_withInvalidEndpoint_shouldFailClosedAndRetry() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let mut config = common::test_config(temp_dir.path());
    config.translation.active_provider_config_mut().endpoint = "http://exa mple".to_string();
    let controller = Controller::with_config(config);

    let first = controller.submit_text("Hola").await?.expect("translated");
    let second = controller.submit_text("Hola").await?.expect("translated");

    assert!(first.translated_preview.starts_with("[Translation error: "));
    assert!(second.translated_preview.starts_with("[Translation error: "));
    assert!(!controller.pipeline().engine().is_initialized());
    Ok(())
}

/// The engine handle can be driven from synchronous code
#[test]
fn test_engineHandle_withBlockingRuntime_shouldBuildMockEngine() {
    let mut config = traductor::Config::default();
    config.translation.provider = TranslationProvider::Mock;
    let handle = traductor::EngineHandle::from_config(&config);

    let engine = tokio_test::block_on(handle.get()).expect("mock engine builds");

    assert!(engine.name().starts_with("Mock"));
    assert_eq!(handle.construction_count(), 1);
}

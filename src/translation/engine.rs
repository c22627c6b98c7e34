/*!
 * The process-wide translation engine.
 *
 * Engines are expensive to build (connection probes, model warm-up on the
 * server side), so the pipeline holds an `EngineHandle` that constructs the
 * configured engine on first use and hands out the same instance afterwards.
 * A failed construction is not cached; the next request tries again.
 */

use async_trait::async_trait;
use log::{debug, info};
use std::fmt::Debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::OnceCell;

use crate::app_config::{Config, TranslationConfig};
use crate::errors::ProviderError;

/// Uniform batch contract every backend exposes to the adapter
#[async_trait]
pub trait TranslationEngine: Send + Sync + Debug {
    /// Translate `segments` in order, generating at most `max_new_tokens` per segment
    async fn translate_segments(
        &self,
        segments: &[String],
        max_new_tokens: u32,
    ) -> Result<Vec<String>, ProviderError>;

    /// Human-readable backend description for logs
    fn name(&self) -> String;
}

/// What an engine needs to know to be built
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Source language code
    pub source_language: String,
    /// Target language code
    pub target_language: String,
    /// Backend selection and options
    pub translation: TranslationConfig,
}

impl From<&Config> for EngineSettings {
    fn from(config: &Config) -> Self {
        Self {
            source_language: config.source_language.clone(),
            target_language: config.target_language.clone(),
            translation: config.translation.clone(),
        }
    }
}

/// Lazily-constructed, shared translation engine
#[derive(Debug)]
pub struct EngineHandle {
    /// Build settings; `None` for handles created around an existing engine
    settings: Option<EngineSettings>,
    /// The engine, once built
    cell: OnceCell<Arc<dyn TranslationEngine>>,
    /// Number of successful constructions
    constructions: AtomicUsize,
}

impl EngineHandle {
    /// Create a handle that builds the configured engine on first use
    pub fn from_config(config: &Config) -> Self {
        Self {
            settings: Some(EngineSettings::from(config)),
            cell: OnceCell::new(),
            constructions: AtomicUsize::new(0),
        }
    }

    /// Create a handle around an engine that already exists
    pub fn preloaded(engine: Arc<dyn TranslationEngine>) -> Self {
        Self {
            settings: None,
            cell: OnceCell::new_with(Some(engine)),
            constructions: AtomicUsize::new(0),
        }
    }

    /// Get the engine, constructing it if this is the first request
    pub async fn get(&self) -> Result<Arc<dyn TranslationEngine>, ProviderError> {
        let engine = self
            .cell
            .get_or_try_init(|| async {
                let settings = self.settings.as_ref().ok_or_else(|| {
                    ProviderError::EngineUnavailable("no engine configured".to_string())
                })?;
                info!(
                    "Loading translation engine ({})",
                    settings.translation.provider.display_name()
                );
                let engine = super::core::build_engine(settings).await?;
                self.constructions.fetch_add(1, Ordering::SeqCst);
                debug!("Translation engine ready: {}", engine.name());
                Ok::<_, ProviderError>(engine)
            })
            .await?;
        Ok(Arc::clone(engine))
    }

    /// True once the engine has been constructed
    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }

    /// How many times an engine was built by this handle
    pub fn construction_count(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }
}

/*!
 * Backend adapter.
 *
 * Turns an ordered batch of chunks into an ordered batch of translations of
 * the same length. Backend failures stop here: the caller always receives one
 * string per chunk, and a failed batch yields error placeholders in every
 * position so downstream reassembly stays aligned.
 */

use log::{debug, warn};
use std::sync::Arc;

use super::engine::EngineHandle;
use crate::errors::ProviderError;

const PLACEHOLDER_PREFIX: &str = "[Translation error: ";

/// Placeholder emitted in place of a translation when the backend fails
pub fn error_placeholder(error: &ProviderError) -> String {
    format!("{}{}]", PLACEHOLDER_PREFIX, error)
}

/// True for strings produced by `error_placeholder`
pub fn is_error_placeholder(text: &str) -> bool {
    text.starts_with(PLACEHOLDER_PREFIX) && text.ends_with(']')
}

/// One placeholder per chunk of a failed batch
pub fn fail_closed(count: usize, error: &ProviderError) -> Vec<String> {
    vec![error_placeholder(error); count]
}

/// Sends chunk batches to the shared engine
#[derive(Debug, Clone)]
pub struct BackendAdapter {
    engine: Arc<EngineHandle>,
    max_generation_length: u32,
}

impl BackendAdapter {
    /// Create an adapter over `engine` with a per-segment generation ceiling
    pub fn new(engine: Arc<EngineHandle>, max_generation_length: u32) -> Self {
        Self {
            engine,
            max_generation_length,
        }
    }

    /// The engine handle this adapter sends to
    pub fn engine(&self) -> &Arc<EngineHandle> {
        &self.engine
    }

    /// Translate `chunks`, returning exactly one string per chunk
    pub async fn translate_batch(&self, chunks: &[String]) -> Vec<String> {
        match self.try_translate_batch(chunks).await {
            Ok(translations) => translations,
            Err(e) => {
                warn!("Translation of {} chunks failed: {}", chunks.len(), e);
                fail_closed(chunks.len(), &e)
            }
        }
    }

    /// Translate `chunks`, surfacing backend failures to the caller
    ///
    /// An empty batch never reaches the engine. A result whose length differs
    /// from the input is reported as `LengthMismatch`.
    pub async fn try_translate_batch(&self, chunks: &[String]) -> Result<Vec<String>, ProviderError> {
        if chunks.is_empty() {
            return Ok(Vec::new());
        }

        let engine = self.engine.get().await?;
        debug!("Sending {} chunks to {}", chunks.len(), engine.name());
        let translations = engine
            .translate_segments(chunks, self.max_generation_length)
            .await?;

        if translations.len() != chunks.len() {
            return Err(ProviderError::LengthMismatch {
                expected: chunks.len(),
                actual: translations.len(),
            });
        }
        Ok(translations)
    }
}

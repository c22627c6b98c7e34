/*!
 * Core translation service implementation.
 *
 * This module contains the TranslationService struct, which drives one of the
 * HTTP backends through the `TranslationEngine` batch contract, and the
 * factory used by the engine handle to build whichever engine is configured.
 */

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt, stream};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Instant;
use url::Url;

use super::engine::{EngineSettings, TranslationEngine};
use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::Provider;
use crate::providers::libretranslate::{LibreTranslate, LibreTranslateRequest};
use crate::providers::mock::MockEngine;
use crate::providers::ollama::{GenerationRequest, Ollama};

/// Validate an endpoint and normalize it to an absolute URL without a trailing slash
fn parse_endpoint(endpoint: &str) -> Result<String, ProviderError> {
    if endpoint.trim().is_empty() {
        return Err(ProviderError::EngineUnavailable("Endpoint cannot be empty".to_string()));
    }

    let url = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Url::parse(endpoint)
    } else {
        Url::parse(&format!("http://{}", endpoint))
    }
    .map_err(|e| ProviderError::EngineUnavailable(format!("Invalid endpoint {}: {}", endpoint, e)))?;

    if url.host_str().is_none() {
        return Err(ProviderError::EngineUnavailable(format!(
            "Invalid host in endpoint: {}",
            endpoint
        )));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Translation provider implementation variants
#[derive(Debug)]
enum TranslationProviderImpl {
    /// LibreTranslate server, batch native
    LibreTranslate {
        /// Client instance
        client: LibreTranslate,
    },

    /// Ollama LLM service, one prompt per segment
    Ollama {
        /// Client instance
        client: Ollama,
        /// Model name
        model: String,
        /// System prompt with the language names filled in
        system_prompt: String,
    },
}

/// Translation service backed by an HTTP server
#[derive(Debug)]
pub struct TranslationService {
    /// Provider implementation
    provider: TranslationProviderImpl,

    /// Configuration for the translation service
    pub config: TranslationConfig,

    /// ISO 639-1 source code sent to the backend
    source_code: String,

    /// ISO 639-1 target code sent to the backend
    target_code: String,
}

impl TranslationService {
    /// Create a new translation service for the given language pair
    pub fn new(
        config: TranslationConfig,
        source_language: &str,
        target_language: &str,
    ) -> Result<Self, ProviderError> {
        let unavailable = |e: anyhow::Error| ProviderError::EngineUnavailable(e.to_string());
        let source_code = language_utils::to_part1(source_language).map_err(unavailable)?;
        let target_code = language_utils::to_part1(target_language).map_err(unavailable)?;

        let endpoint = parse_endpoint(&config.get_endpoint())?;
        let retry_count = config.common.retry_count;
        let retry_backoff_ms = config.common.retry_backoff_ms;
        let timeout_secs = config.get_timeout_secs();

        let provider = match config.provider {
            ConfigTranslationProvider::LibreTranslate => TranslationProviderImpl::LibreTranslate {
                client: LibreTranslate::new_with_config(
                    endpoint,
                    config.get_api_key(),
                    retry_count,
                    retry_backoff_ms,
                    timeout_secs,
                ),
            },
            ConfigTranslationProvider::Ollama => {
                let source_name = language_utils::get_language_name(source_language).map_err(unavailable)?;
                let target_name = language_utils::get_language_name(target_language).map_err(unavailable)?;
                TranslationProviderImpl::Ollama {
                    client: Ollama::new_with_config(endpoint, retry_count, retry_backoff_ms, timeout_secs),
                    model: config.get_model(),
                    system_prompt: config
                        .common
                        .system_prompt
                        .replace("{source_language}", &source_name)
                        .replace("{target_language}", &target_name),
                }
            }
            ConfigTranslationProvider::Mock => {
                return Err(ProviderError::EngineUnavailable(
                    "The mock backend is not served over HTTP".to_string(),
                ));
            }
        };

        Ok(Self {
            provider,
            config,
            source_code,
            target_code,
        })
    }

    /// Test the connection to the translation provider
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        info!(
            "Testing connection to {} at {}",
            self.config.provider.display_name(),
            self.endpoint()
        );
        match &self.provider {
            TranslationProviderImpl::LibreTranslate { client } => client.test_connection().await,
            TranslationProviderImpl::Ollama { client, .. } => client.test_connection().await,
        }
    }

    /// The endpoint requests go to
    pub fn endpoint(&self) -> &str {
        match &self.provider {
            TranslationProviderImpl::LibreTranslate { client } => client.base_url(),
            TranslationProviderImpl::Ollama { client, .. } => client.base_url(),
        }
    }

    async fn translate_with_ollama(
        &self,
        client: &Ollama,
        model: &str,
        system_prompt: &str,
        segments: &[String],
        max_new_tokens: u32,
    ) -> Result<Vec<String>, ProviderError> {
        // One prompt per segment, in order; the first failure fails the batch
        stream::iter(segments)
            .then(|segment| async move {
                let request = GenerationRequest::new(model, segment.as_str())
                    .system(system_prompt)
                    .temperature(self.config.common.temperature)
                    .max_tokens(max_new_tokens);
                let response = client.complete(request).await?;
                Ok::<_, ProviderError>(Ollama::extract_text(&response).concat())
            })
            .try_collect()
            .await
    }
}

#[async_trait]
impl TranslationEngine for TranslationService {
    async fn translate_segments(
        &self,
        segments: &[String],
        max_new_tokens: u32,
    ) -> Result<Vec<String>, ProviderError> {
        let start_time = Instant::now();

        let translated = match &self.provider {
            TranslationProviderImpl::LibreTranslate { client } => {
                // The server picks its own output length
                let request = LibreTranslateRequest::new(
                    segments.to_vec(),
                    self.source_code.as_str(),
                    self.target_code.as_str(),
                );
                let response = client.complete(request).await?;
                LibreTranslate::extract_text(&response)
            }
            TranslationProviderImpl::Ollama {
                client,
                model,
                system_prompt,
            } => {
                self.translate_with_ollama(client, model, system_prompt, segments, max_new_tokens)
                    .await?
            }
        };

        debug!(
            "{} translated {} segments in {:?}",
            self.config.provider.display_name(),
            segments.len(),
            start_time.elapsed()
        );
        Ok(translated)
    }

    fn name(&self) -> String {
        match &self.provider {
            TranslationProviderImpl::LibreTranslate { client } => {
                format!("LibreTranslate at {}", client.base_url())
            }
            TranslationProviderImpl::Ollama { client, model, .. } => {
                format!("Ollama {} at {}", model, client.base_url())
            }
        }
    }
}

/// Build the engine described by `settings`
///
/// The connection probe only warns: a server that is still starting up may
/// answer by the time the first real batch arrives.
pub async fn build_engine(settings: &EngineSettings) -> Result<Arc<dyn TranslationEngine>, ProviderError> {
    if settings.translation.provider == ConfigTranslationProvider::Mock {
        return Ok(Arc::new(MockEngine::echo()));
    }

    let service = TranslationService::new(
        settings.translation.clone(),
        &settings.source_language,
        &settings.target_language,
    )?;

    if settings.translation.common.verify_connection {
        if let Err(e) = service.test_connection().await {
            warn!("Could not reach {}: {}", service.endpoint(), e);
        }
    }

    Ok(Arc::new(service))
}

/*!
 * Provider implementations for the translation backends.
 *
 * This module contains client implementations for the supported backends:
 * - LibreTranslate: self-hosted machine-translation server (batch native)
 * - Ollama: local LLM server driven by a translation prompt
 * - Mock: deterministic in-process engine for tests and dry runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all HTTP backends
///
/// This trait defines the interface every client follows, allowing them to be
/// driven the same way by the translation engine.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Extract the translated text from the provider response
    fn extract_text(response: &Self::Response) -> Vec<String>;
}

/// Delay before retry `attempt` (1-based): `base * 2^(attempt - 1)`
pub(crate) fn backoff_delay_ms(base_ms: u64, attempt: u32) -> u64 {
    base_ms.saturating_mul(1u64 << (attempt.saturating_sub(1)).min(16))
}

/// Truncate a response body for log output
pub(crate) fn truncate_for_log(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}

pub mod libretranslate;
pub mod mock;
pub mod ollama;

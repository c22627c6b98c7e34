/*!
 * Mock translation engine for tests and offline runs.
 *
 * The mock simulates the behaviors the adapter has to cope with:
 * - `MockEngine::echo()` - returns every segment unchanged
 * - `MockEngine::dictionary(..)` - word-by-word lookup, unknown words kept
 * - `MockEngine::failing()` - always fails with an error
 * - `MockEngine::wrong_length()` - drops the last segment of every batch
 * - `MockEngine::intermittent(n)` - fails every nth call
 *
 * Every call is counted and every received segment recorded, so tests can
 * assert how often (and with what) the backend was invoked.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::translation::engine::TranslationEngine;

/// Behavior mode for the mock engine
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Identity translation
    Echo,
    /// Replace known words, keep the rest
    Dictionary(HashMap<String, String>),
    /// Always fails with an error
    Failing,
    /// Returns one segment fewer than it was given
    WrongLength,
    /// Fails every nth call, echoes otherwise
    Intermittent { fail_every: usize },
    /// Echoes after a delay
    Slow { delay_ms: u64 },
}

/// In-process engine with observable call history
#[derive(Debug, Clone)]
pub struct MockEngine {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of `translate_segments` calls, shared between clones
    calls: Arc<AtomicUsize>,
    /// Every segment received, in order
    received: Arc<Mutex<Vec<String>>>,
}

impl MockEngine {
    /// Create a mock engine with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Identity engine
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Word-by-word dictionary engine
    pub fn dictionary<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = pairs
            .into_iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        Self::new(MockBehavior::Dictionary(map))
    }

    /// Engine that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Engine that breaks the one-output-per-input contract
    pub fn wrong_length() -> Self {
        Self::new(MockBehavior::WrongLength)
    }

    /// Engine that fails on every `fail_every`th call
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent {
            fail_every: fail_every.max(1),
        })
    }

    /// Number of batches this engine (or any clone of it) has been asked to translate
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// All segments received so far
    pub fn received(&self) -> Vec<String> {
        self.received.lock().clone()
    }

    fn lookup(map: &HashMap<String, String>, segment: &str) -> String {
        if let Some(whole) = map.get(segment) {
            return whole.clone();
        }
        segment
            .split(' ')
            .map(|word| map.get(word).map(String::as_str).unwrap_or(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl TranslationEngine for MockEngine {
    async fn translate_segments(
        &self,
        segments: &[String],
        _max_new_tokens: u32,
    ) -> Result<Vec<String>, ProviderError> {
        let count = self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().extend(segments.iter().cloned());

        match &self.behavior {
            MockBehavior::Echo => Ok(segments.to_vec()),

            MockBehavior::Dictionary(map) => Ok(segments
                .iter()
                .map(|segment| Self::lookup(map, segment))
                .collect()),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated backend failure".to_string(),
            }),

            MockBehavior::WrongLength => {
                let mut out = segments.to_vec();
                out.pop();
                Ok(out)
            }

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated intermittent failure (call #{})", count + 1),
                    })
                } else {
                    Ok(segments.to_vec())
                }
            }

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(*delay_ms)).await;
                Ok(segments.to_vec())
            }
        }
    }

    fn name(&self) -> String {
        let mode = match &self.behavior {
            MockBehavior::Echo => "echo",
            MockBehavior::Dictionary(_) => "dictionary",
            MockBehavior::Failing => "failing",
            MockBehavior::WrongLength => "wrong-length",
            MockBehavior::Intermittent { .. } => "intermittent",
            MockBehavior::Slow { .. } => "slow",
        };
        format!("Mock ({})", mode)
    }
}

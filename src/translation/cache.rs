/*!
 * Translation caching functionality.
 *
 * Spreadsheets repeat themselves (whole columns of the same label), so
 * translated chunks are remembered for the duration of one request and
 * dropped with it. Only successful translations are stored; a chunk whose
 * batch failed is sent to the backend again when it repeats.
 */

use log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::providers::truncate_for_log;

/// Cache key combining chunk text with the language pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    source_text: String,
    source_language: String,
    target_language: String,
}

impl CacheKey {
    fn new(source_text: &str, source_language: &str, target_language: &str) -> Self {
        Self {
            source_text: source_text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }
}

/// In-memory chunk translation cache
#[derive(Debug)]
pub struct TranslationCache {
    /// Internal cache storage
    entries: RwLock<HashMap<CacheKey, String>>,

    /// Cache hit counter
    hits: AtomicUsize,

    /// Cache miss counter
    misses: AtomicUsize,

    /// Whether caching is enabled
    enabled: bool,
}

impl TranslationCache {
    /// Create a new translation cache
    pub fn new(enabled: bool) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            enabled,
        }
    }

    /// Get a translation from the cache
    pub fn get(&self, source_text: &str, source_language: &str, target_language: &str) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let key = CacheKey::new(source_text, source_language, target_language);
        match self.entries.read().get(&key) {
            Some(translation) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(
                    "Cache hit for '{}' ({} -> {})",
                    truncate_for_log(source_text, 30),
                    source_language,
                    target_language
                );
                Some(translation.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a translation in the cache
    pub fn store(&self, source_text: &str, source_language: &str, target_language: &str, translation: &str) {
        if !self.enabled {
            return;
        }

        let key = CacheKey::new(source_text, source_language, target_language);
        self.entries.write().insert(key, translation.to_string());
    }

    /// Number of cached translations
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// (hits, misses) since creation
    pub fn stats(&self) -> (usize, usize) {
        (self.hits.load(Ordering::Relaxed), self.misses.load(Ordering::Relaxed))
    }
}

/*!
 * Chunk, translate, reassemble.
 *
 * The pipeline is the only path text takes to the backend: free text goes
 * through it once, spreadsheet cells go through it one by one. Only the
 * engine outlives a request; chunk caches are created per request and
 * dropped with it.
 */

use log::{debug, info};
use std::sync::Arc;
use std::time::Instant;

use super::adapter::{self, BackendAdapter};
use super::cache::TranslationCache;
use super::chunker::Chunker;
use super::engine::EngineHandle;
use super::reassembler;
use crate::app_config::Config;
use crate::document::{CellValue, Document, Table};

/// Text translation pipeline shared by every request
#[derive(Debug)]
pub struct TranslationPipeline {
    chunker: Chunker,
    adapter: BackendAdapter,
    cache_enabled: bool,
    source_language: String,
    target_language: String,
}

impl TranslationPipeline {
    /// Create a pipeline over `engine` using the configured limits
    pub fn new(config: &Config, engine: Arc<EngineHandle>) -> Self {
        Self {
            chunker: Chunker::new(config.chunking.max_chunk_length),
            adapter: BackendAdapter::new(engine, config.chunking.max_generation_length),
            cache_enabled: config.translation.common.cache_enabled,
            source_language: config.source_language.clone(),
            target_language: config.target_language.clone(),
        }
    }

    /// The shared engine handle
    pub fn engine(&self) -> &Arc<EngineHandle> {
        self.adapter.engine()
    }

    /// Translate free text
    ///
    /// Whitespace-only input is returned unchanged without touching the
    /// backend. Otherwise the result holds one paragraph per chunk, in order.
    pub async fn translate_text(&self, text: &str) -> String {
        let cache = TranslationCache::new(self.cache_enabled);
        self.translate_text_with(&cache, text).await
    }

    /// Translate every non-blank text cell of `table`, leaving the header and other cells untouched
    ///
    /// `on_progress` is called with (cells done, cells total) after each
    /// translated cell. Identical chunks within the table reach the backend once.
    pub async fn translate_table<F>(&self, table: &Table, mut on_progress: F) -> Table
    where
        F: FnMut(usize, usize),
    {
        let cache = TranslationCache::new(self.cache_enabled);
        let total = table.translatable_cell_count();
        let start_time = Instant::now();
        let mut done = 0;
        let mut rows = Vec::with_capacity(table.rows.len());

        for row in &table.rows {
            let mut translated_row = Vec::with_capacity(row.len());
            for cell in row {
                let translated = match cell.translatable_text() {
                    Some(text) => {
                        let translated = CellValue::Text(self.translate_text_with(&cache, text).await);
                        done += 1;
                        on_progress(done, total);
                        translated
                    }
                    None => cell.clone(),
                };
                translated_row.push(translated);
            }
            rows.push(translated_row);
        }

        let (hits, misses) = cache.stats();
        info!(
            "Translated {} cells in {:?} ({} chunks from cache, {} sent)",
            total,
            start_time.elapsed(),
            hits,
            misses
        );
        Table {
            columns: table.columns.clone(),
            rows,
        }
    }

    async fn translate_text_with(&self, cache: &TranslationCache, text: &str) -> String {
        let document = Document::from_text(text);
        if document.is_blank() {
            return text.to_string();
        }

        let chunks = self.chunker.split(&document);
        debug!("Split {} lines into {} chunks", document.lines().len(), chunks.len());
        let translated = self.translate_chunks(cache, &chunks).await;
        reassembler::reassemble(&translated)
    }

    /// Translate chunks, answering from `cache` where possible
    async fn translate_chunks(&self, cache: &TranslationCache, chunks: &[String]) -> Vec<String> {
        let mut results: Vec<Option<String>> = chunks
            .iter()
            .map(|chunk| cache.get(chunk, &self.source_language, &self.target_language))
            .collect();

        let misses: Vec<String> = chunks
            .iter()
            .zip(&results)
            .filter(|(_, cached)| cached.is_none())
            .map(|(chunk, _)| chunk.clone())
            .collect();

        if !misses.is_empty() {
            let translated = self.adapter.translate_batch(&misses).await;
            for (chunk, translation) in misses.iter().zip(&translated) {
                // A failed chunk is sent again if it repeats
                if !adapter::is_error_placeholder(translation) {
                    cache.store(chunk, &self.source_language, &self.target_language, translation);
                }
            }

            let mut translated = translated.into_iter();
            for slot in results.iter_mut().filter(|slot| slot.is_none()) {
                *slot = translated.next();
            }
        }

        results.into_iter().map(Option::unwrap_or_default).collect()
    }
}

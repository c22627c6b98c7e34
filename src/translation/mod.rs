/*!
 * Text translation.
 *
 * This module turns Spanish text into English text. It is split into
 * several submodules:
 *
 * - `chunker`: line-preserving splitting into bounded chunks
 * - `engine`: the backend contract and the shared, lazily-built engine
 * - `core`: the HTTP-backed engine and the engine factory
 * - `adapter`: fail-closed batch translation
 * - `cache`: in-memory chunk cache
 * - `reassembler`: joining translated chunks back together
 * - `pipeline`: the chunk, translate, reassemble flow used by every request
 */

// Re-export main types for easier usage
pub use self::adapter::BackendAdapter;
pub use self::chunker::{Chunker, chunk_text};
pub use self::core::TranslationService;
pub use self::engine::{EngineHandle, TranslationEngine};
pub use self::pipeline::TranslationPipeline;
pub use self::reassembler::reassemble;

// Submodules
pub mod adapter;
pub mod cache;
pub mod chunker;
pub mod core;
pub mod engine;
pub mod pipeline;
pub mod reassembler;

/*!
 * # traductor - Spanish to English translator
 *
 * A Rust library for translating Spanish text and documents into English
 * with a local, open-source machine-translation backend.
 *
 * ## Features
 *
 * - Translate typed text, `.txt` files, `.xlsx` spreadsheets and PDFs
 * - Line-preserving chunking bounded by the backend's input limit
 * - Fail-closed batch translation: a backend error never breaks alignment
 * - Backends:
 *   - LibreTranslate (self-hosted OPUS-MT / Argos models)
 *   - Ollama (local LLM)
 *   - Mock (offline, for tests and dry runs)
 * - TXT, Word and Excel download artifacts
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: Documents, tables and input kinds
 * - `extract`: Text and table extraction from uploads
 * - `translation`: Chunking, the shared engine, fail-closed batches and reassembly
 * - `export`: TXT, DOCX and XLSX rendering
 * - `file_utils`: File system operations
 * - `app_controller`: Request handlers used by the CLI
 * - `language_utils`: ISO language code utilities
 * - `providers`: HTTP clients for the translation backends
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod export;
pub mod extract;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, TranslationOutcome};
pub use document::{CellValue, Document, InputKind, Table};
pub use errors::{AppError, ExportError, ExtractionError, ProviderError};
pub use language_utils::{get_language_name, language_codes_match};
pub use translation::{EngineHandle, TranslationEngine, TranslationPipeline, chunk_text, reassemble};

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::document::InputKind;
use crate::errors::AppError;
use crate::export::{self, ArtifactKind, RenderedArtifact};
use crate::extract::{self, Extracted};
use crate::file_utils::FileManager;
use crate::translation::{EngineHandle, TranslationPipeline};

// @module: Application controller for translation requests

/// Characters of extracted PDF text shown before translating
pub const PDF_PREVIEW_CHARS: usize = 1000;

/// Spreadsheet rows shown before and after translating
pub const TABLE_PREVIEW_ROWS: usize = 5;

/// Warning shown when the typed text is blank
pub const EMPTY_TEXT_WARNING: &str = "Please enter some Spanish text to translate.";

/// A file written to the output directory
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub path: PathBuf,
}

/// Everything one request produced
#[derive(Debug, Clone)]
pub struct TranslationOutcome {
    /// Upload kind, `None` for typed text
    pub input_kind: Option<InputKind>,
    /// What the user submitted, shortened for display
    pub original_preview: String,
    /// The translation, shortened for display
    pub translated_preview: String,
    /// Downloadable artifacts in the order they are offered
    pub artifacts: Vec<Artifact>,
    /// Wall time of the request
    pub elapsed: Duration,
}

impl TranslationOutcome {
    /// Headings shown above the original and translated previews
    pub fn headings(&self) -> (Option<&'static str>, &'static str) {
        match self.input_kind {
            None => (None, "English Translation:"),
            Some(InputKind::PlainText) => (Some("Original (Spanish):"), "Translated (English):"),
            Some(InputKind::Spreadsheet) => (
                Some("Original Excel (First 5 Rows):"),
                "Translated Excel (First 5 Rows):",
            ),
            Some(InputKind::Pdf) => (
                Some("Original PDF Text (First 1000 characters):"),
                "Translated (English):",
            ),
        }
    }

    /// Label of the download control for `artifact`
    pub fn download_label(&self, artifact: &Artifact) -> String {
        let subject = match self.input_kind {
            None => "Translation",
            Some(InputKind::PlainText) => "Translated File",
            Some(InputKind::Spreadsheet) => "Translated Excel",
            Some(InputKind::Pdf) => "Translated PDF",
        };
        format!("Download {} ({})", subject, artifact.kind)
    }
}

/// Main application controller
///
/// Requests are handled one at a time. The pipeline, and with it the
/// translation engine, lives as long as the controller.
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Shared translation pipeline
    pipeline: TranslationPipeline,
    // @field: Whether to draw progress bars
    show_progress: bool,
}

impl Controller {
    // @method: Create a controller whose engine is built from the configuration on first use
    pub fn with_config(config: Config) -> Self {
        let engine = Arc::new(EngineHandle::from_config(&config));
        Self::with_engine(config, engine)
    }

    /// Create a controller around an existing engine handle
    pub fn with_engine(config: Config, engine: Arc<EngineHandle>) -> Self {
        let pipeline = TranslationPipeline::new(&config, engine);
        Self {
            config,
            pipeline,
            show_progress: false,
        }
    }

    /// Draw progress bars for long requests
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The translation pipeline shared by all requests
    pub fn pipeline(&self) -> &TranslationPipeline {
        &self.pipeline
    }

    /// Where artifacts are written
    pub fn output_dir(&self) -> &Path {
        &self.config.output.directory
    }

    /// Handle typed text
    ///
    /// Returns `Ok(None)` without touching the backend when the text is blank.
    pub async fn submit_text(&self, text: &str) -> Result<Option<TranslationOutcome>, AppError> {
        if text.trim().is_empty() {
            warn!("{}", EMPTY_TEXT_WARNING);
            return Ok(None);
        }

        let start_time = Instant::now();
        let translated = self.pipeline.translate_text(text).await;
        let artifacts = self.write_artifacts(export::render_text("translated_canvas", &translated)?)?;

        Ok(Some(TranslationOutcome {
            input_kind: None,
            original_preview: text.to_string(),
            translated_preview: translated,
            artifacts,
            elapsed: start_time.elapsed(),
        }))
    }

    /// Handle an uploaded file
    ///
    /// `declared` is an explicit kind (`txt`, `xlsx`, `pdf`) or MIME type; the
    /// file extension is used when it is absent.
    pub async fn upload_file(&self, path: &Path, declared: Option<&str>) -> Result<TranslationOutcome, AppError> {
        let kind = FileManager::detect_input_kind(path, declared).map_err(|e| AppError::File(format!("{:#}", e)))?;
        let bytes = FileManager::read_bytes(path).map_err(|e| AppError::File(format!("{:#}", e)))?;
        info!("Translating {} ({}, {} bytes)", path.display(), kind, bytes.len());
        self.translate_upload(kind, &bytes).await
    }

    /// Handle upload content whose kind is already known
    pub async fn translate_upload(&self, kind: InputKind, bytes: &[u8]) -> Result<TranslationOutcome, AppError> {
        let start_time = Instant::now();

        let (original_preview, translated_preview, rendered) = match extract::extract(kind, bytes)? {
            Extracted::Text(text) => {
                let translated = self.pipeline.translate_text(&text).await;
                let (stem, preview): (&str, String) = match kind {
                    InputKind::Pdf => ("translated_pdf", text.chars().take(PDF_PREVIEW_CHARS).collect()),
                    _ => ("translated", text.clone()),
                };
                let rendered = export::render_text(stem, &translated)?;
                (preview, translated, rendered)
            }
            Extracted::Table(table) => {
                let progress_bar = self.cell_progress_bar(table.translatable_cell_count());
                let translated = self
                    .pipeline
                    .translate_table(&table, |done, _| progress_bar.set_position(done as u64))
                    .await;
                progress_bar.finish_and_clear();

                let rendered = export::render_table(&translated)?;
                (
                    table.preview(TABLE_PREVIEW_ROWS),
                    translated.preview(TABLE_PREVIEW_ROWS),
                    rendered,
                )
            }
        };

        let artifacts = self.write_artifacts(rendered)?;
        let elapsed = start_time.elapsed();
        info!("Translation completed in {}.", Self::format_duration(elapsed));

        Ok(TranslationOutcome {
            input_kind: Some(kind),
            original_preview,
            translated_preview,
            artifacts,
            elapsed,
        })
    }

    fn write_artifacts(&self, rendered: Vec<RenderedArtifact>) -> Result<Vec<Artifact>, AppError> {
        let output_dir = self.output_dir();
        rendered
            .into_iter()
            .map(|artifact| {
                let path = FileManager::write_bytes(output_dir.join(&artifact.file_name), &artifact.bytes)
                    .map_err(|e| AppError::File(format!("{:#}", e)))?;
                debug!("Wrote {} artifact {}", artifact.kind, path.display());
                Ok(Artifact {
                    kind: artifact.kind,
                    file_name: artifact.file_name,
                    path,
                })
            })
            .collect()
    }

    fn cell_progress_bar(&self, total: usize) -> ProgressBar {
        if !self.show_progress || total == 0 {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} cells ({percent}%) {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%)"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downloadLabel_shouldNameSubjectAndFormat() {
        let artifact = Artifact {
            kind: ArtifactKind::Spreadsheet,
            file_name: "translated.xlsx".to_string(),
            path: PathBuf::from("translated.xlsx"),
        };
        let outcome = TranslationOutcome {
            input_kind: Some(InputKind::Spreadsheet),
            original_preview: String::new(),
            translated_preview: String::new(),
            artifacts: vec![artifact.clone()],
            elapsed: Duration::ZERO,
        };
        assert_eq!(outcome.download_label(&artifact), "Download Translated Excel (XLSX)");
        assert_eq!(outcome.headings().1, "Translated Excel (First 5 Rows):");
    }

    #[test]
    fn test_formatDuration_shouldPickLargestUnit() {
        assert_eq!(Controller::format_duration(Duration::from_millis(1500)), "1.500s");
        assert_eq!(Controller::format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(Controller::format_duration(Duration::from_secs(3725)), "1h 2m 5s");
    }
}

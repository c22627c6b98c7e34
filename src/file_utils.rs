use anyhow::{Context, Result, anyhow};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::document::InputKind;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path).with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Read a whole upload into memory
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
        let path = path.as_ref();
        if !Self::file_exists(path) {
            return Err(anyhow!("File does not exist: {:?}", path));
        }
        fs::read(path).with_context(|| format!("Failed to read file: {:?}", path))
    }

    /// Write an artifact atomically
    ///
    /// The payload goes to a temporary file in the target directory first and
    /// is renamed into place, so a reader never sees a half-written artifact.
    pub fn write_bytes<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<PathBuf> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::ensure_dir(&parent)?;

        let mut temp = NamedTempFile::new_in(&parent)
            .with_context(|| format!("Failed to create temporary file in {:?}", parent))?;
        temp.write_all(content)
            .with_context(|| format!("Failed to write to file: {:?}", path))?;
        temp.persist(path)
            .map_err(|e| anyhow!("Failed to move artifact into place at {:?}: {}", path, e.error))?;

        Ok(path.to_path_buf())
    }

    /// Work out what kind of upload `path` is
    ///
    /// A declared kind (from `--kind` or a MIME type) wins over the extension.
    pub fn detect_input_kind<P: AsRef<Path>>(path: P, declared: Option<&str>) -> Result<InputKind> {
        if let Some(declared) = declared {
            return declared
                .parse::<InputKind>()
                .with_context(|| format!("Unsupported declared kind for {:?}", path.as_ref()));
        }
        Ok(InputKind::detect(path.as_ref())?)
    }
}

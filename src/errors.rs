/*!
 * Error types for the traductor application.
 *
 * This module contains custom error types for the different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 * Backend errors never escape the translation adapter; extraction and export
 * errors are reported per request.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation backend
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The backend answered with a different number of segments than it was given
    #[error("Backend returned {actual} segments for {expected} inputs")]
    LengthMismatch {
        /// Number of segments sent
        expected: usize,
        /// Number of segments received
        actual: usize,
    },

    /// The engine could not be constructed
    #[error("Translation engine unavailable: {0}")]
    EngineUnavailable(String),
}

/// Errors that can occur while pulling text out of an uploaded file
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The file is not one of the accepted kinds
    #[error("Unsupported input kind: {0}")]
    UnsupportedKind(String),

    /// A plain-text upload is not valid UTF-8
    #[error("Text file is not valid UTF-8: {0}")]
    InvalidEncoding(String),

    /// The spreadsheet could not be opened or has no worksheet
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// The PDF could not be parsed at all
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Reading the upload failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while rendering a download artifact
#[derive(Error, Debug)]
pub enum ExportError {
    /// Writing the OOXML package failed
    #[error("Archive error: {0}")]
    Archive(String),

    /// Writing the payload failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<zip::result::ZipError> for ExportError {
    fn from(error: zip::result::ZipError) -> Self {
        Self::Archive(error.to_string())
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error while extracting an upload
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Error while rendering an artifact
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

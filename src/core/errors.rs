//! Shared error types for the report pipeline

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal errors raised while producing a report.
///
/// Everything that goes wrong with a single input file is a [`LoadError`]
/// instead, and never escapes the collector.
#[derive(Debug, Error)]
pub enum ReportError {
    /// File system related errors
    #[error("File system error: {message} ({})", path.display())]
    FileSystem {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Workbook construction or serialization errors
    #[error("Workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}

impl ReportError {
    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl AsRef<Path>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, ReportError>;

/// Why a single benchmark file was skipped.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("json root is not an object")]
    NotAnObject,
}

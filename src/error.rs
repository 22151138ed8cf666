//! Errors raised at the file boundary: saving, loading and exporting.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a save, load or export operation.
///
/// None of these leave the in-memory scene modified.
#[derive(Debug, Error)]
pub enum ArrangementError {
    /// The document could not be parsed or does not describe a valid scene
    #[error("invalid arrangement file: {0}")]
    InvalidFile(String),
    /// The file could not be read, written or renamed
    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        /// File the operation was working on
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// The image could not be rendered or encoded
    #[error("image export failed: {0}")]
    Export(String),
}

impl ArrangementError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for file-boundary operations.
pub type Result<T> = std::result::Result<T, ArrangementError>;

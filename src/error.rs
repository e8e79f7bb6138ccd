//! Error types for roster export operations

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for roster export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Error types for scanning, writing and copying a roster export
#[derive(Error, Debug)]
pub enum ExportError {
    /// Input/output errors (cannot create directory, cannot write file, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory enumeration failed below the dataset root
    #[error("Failed to scan '{}': {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// JSON document could not be rendered
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Image encoding errors (mock dataset generation only)
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

impl ExportError {
    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a scan error for the directory being enumerated
    pub fn scan<P: AsRef<Path>>(path: P, source: walkdir::Error) -> Self {
        Self::Scan {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create file I/O error with operation context
    pub fn file_io_error<P: AsRef<Path>>(operation: &str, path: P, error: &std::io::Error) -> Self {
        let path_display = path.as_ref().display();
        Self::Io(std::io::Error::new(
            error.kind(),
            format!("Failed to {} '{}': {}", operation, path_display, error),
        ))
    }
}

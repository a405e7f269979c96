//! Error types for filespread
//!
//! This module defines the error hierarchy covering:
//! - Catalog construction (directory enumeration)
//! - Configuration and CLI errors
//! - Worker thread errors
//! - Per-file processing errors
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Errors should be actionable - include context about what to do
//! - Per-file failures are recovered inside the worker loop and never
//!   abort the run; everything else is fatal

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the filespread application
#[derive(Error, Debug)]
pub enum SpreadError {
    /// Catalog construction errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Worker/concurrency errors
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors building the work catalog
///
/// Both variants are terminal for the run: they are reported to the
/// caller and no workers are started.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The source directory could not be enumerated
    #[error("Cannot enumerate '{path}': {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    /// Enumeration succeeded but yielded zero regular files
    #[error("No files found in '{path}'")]
    Empty { path: PathBuf },
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid worker count
    #[error("Invalid worker count {count}: must be between 1 and {max}")]
    InvalidWorkerCount { count: usize, max: usize },

    /// Invalid exclude pattern
    #[error("Invalid exclude pattern '{pattern}': {reason}")]
    InvalidExcludePattern { pattern: String, reason: String },

    /// Source directory path error
    #[error("Invalid source directory '{path}': {reason}")]
    InvalidSourceDir { path: PathBuf, reason: String },
}

/// Worker thread errors
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Worker panicked
    #[error("Worker {id} panicked: {message}")]
    Panicked { id: usize, message: String },

    /// Worker thread could not be spawned
    #[error("Failed to spawn worker {id}: {reason}")]
    SpawnFailed { id: usize, reason: String },
}

/// Per-file processing errors
///
/// These are recovered locally inside the worker loop: the failure is
/// logged with the file's identity and the worker advances to its next
/// assignment. No retries are performed.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// File disappeared between cataloging and processing
    #[error("File not found: '{path}'")]
    NotFound { path: PathBuf },

    /// Permission denied
    #[error("Permission denied: '{path}'")]
    PermissionDenied { path: PathBuf },

    /// Generic I/O failure
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ProcessError {
    /// Classify an I/O error against the file it occurred on
    pub fn from_io(path: PathBuf, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ProcessError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => ProcessError::PermissionDenied { path },
            _ => ProcessError::Io { path, source: err },
        }
    }
}

/// Result type alias for SpreadError
pub type Result<T> = std::result::Result<T, SpreadError>;

/// Result type alias for CatalogError
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Result type alias for ProcessError
pub type ProcessResult<T> = std::result::Result<T, ProcessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_error_classification() {
        let not_found = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ProcessError::from_io(PathBuf::from("/missing"), not_found);
        assert!(matches!(err, ProcessError::NotFound { .. }));

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no");
        let err = ProcessError::from_io(PathBuf::from("/locked"), denied);
        assert!(matches!(err, ProcessError::PermissionDenied { .. }));

        let other = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err = ProcessError::from_io(PathBuf::from("/f"), other);
        assert!(matches!(err, ProcessError::Io { .. }));
    }

    #[test]
    fn test_error_conversion() {
        let cat_err = CatalogError::Empty {
            path: PathBuf::from("/data"),
        };
        let spread_err: SpreadError = cat_err.into();
        assert!(matches!(spread_err, SpreadError::Catalog(_)));
    }

}

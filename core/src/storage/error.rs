//! Error types for reconstruction output

use std::path::PathBuf;
use thiserror::Error;

/// Errors during parquet and report writing.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to create file {path}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create output directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("arrow conversion error")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("parquet error")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("failed to serialize report")]
    Report(#[from] serde_json::Error),

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

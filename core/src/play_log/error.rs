//! Error types for season-table ingestion

use std::path::PathBuf;
use thiserror::Error;

/// Errors while reading the season play-by-play table.
///
/// Individual malformed rows are skipped with a local default; only a table
/// that yields no usable event at all is fatal.
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("failed to open season file {path}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to memory map file {path}")]
    MemoryMap {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read header row of {path}")]
    Header {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("season file {path} contains no usable event rows")]
    NoUsableRows { path: PathBuf },
}

//! Error types for rotation acquisition and storage

use std::path::PathBuf;
use thiserror::Error;

/// Errors on the incremental rotation store.
#[derive(Debug, Error)]
pub enum RotationError {
    #[error("failed to open rotation store {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read rotation store {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to append to rotation store {path}")]
    Append {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Errors while acquiring rotations from the remote provider.
///
/// A single game's failure is recorded and skipped by the fetcher, never
/// fatal to the run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build http client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("request for game {game_id} failed")]
    Request {
        game_id: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("provider response for game {game_id} is missing column {column}")]
    MalformedResponse { game_id: String, column: String },

    #[error("worker pool closed unexpectedly")]
    WorkerPool,
}

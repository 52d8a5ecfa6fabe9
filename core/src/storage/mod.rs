//! Storage module for writing reconstructed games and reports.
//!
//! Each game lands in its own parquet file named `{game_id}.parquet`;
//! validation reports are JSON next to them.

mod error;
mod writer;

pub use error::StorageError;
pub use writer::StateWriter;

use std::path::{Path, PathBuf};

use crate::validate::GameReport;

/// Ensure an output directory exists and return it.
pub fn ensure_dir(path: &Path) -> Result<PathBuf, StorageError> {
    std::fs::create_dir_all(path).map_err(|e| StorageError::CreateDir {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(path.to_path_buf())
}

/// Parquet filename for a game.
pub fn game_filename(game_id: &str) -> String {
    format!("{game_id}.parquet")
}

/// Report filename for a game.
pub fn report_filename(game_id: &str) -> String {
    format!("{game_id}.report.json")
}

/// Write a validation report as pretty JSON.
pub fn write_report(path: &Path, report: &GameReport) -> Result<(), StorageError> {
    let json = serde_json::to_vec_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}

//! Incremental CSV store for rotation rows.
//!
//! Append-only across acquisition sessions: a partially completed run is
//! resumed by checking which game ids are already present rather than
//! re-fetching everything.

use hashbrown::HashSet;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use super::error::RotationError;
use super::interval::{RotationBook, RotationRow};

pub struct RotationStore {
    path: PathBuf,
}

impl RotationStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full store into a lookup book. A missing file is not an
    /// error: the reconstruction degrades to tiers 2/3 for every game.
    pub fn load_book(&self) -> Result<RotationBook, RotationError> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "no rotation store; running without tier 1");
            return Ok(RotationBook::default());
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .map_err(|e| RotationError::Read {
                path: self.path.clone(),
                source: e,
            })?;
        let mut rows = Vec::new();
        for record in reader.deserialize::<RotationRow>() {
            match record {
                Ok(row) => rows.push(row),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable rotation row");
                }
            }
        }
        let book = RotationBook::from_rows(rows);
        tracing::info!(games = book.len(), "rotation store loaded");
        Ok(book)
    }

    /// Game ids already persisted, for resumable acquisition.
    pub fn existing_game_ids(&self) -> Result<HashSet<String>, RotationError> {
        let mut ids = HashSet::new();
        if !self.path.exists() {
            return Ok(ids);
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .map_err(|e| RotationError::Read {
                path: self.path.clone(),
                source: e,
            })?;
        for record in reader.deserialize::<RotationRow>() {
            if let Ok(row) = record {
                ids.insert(row.game_id);
            }
        }
        Ok(ids)
    }

    /// Append a batch, writing the header only when the file is new.
    pub fn append(&self, rows: &[RotationRow]) -> Result<(), RotationError> {
        if rows.is_empty() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| RotationError::Open {
                path: self.path.clone(),
                source: e,
            })?;
        }
        let write_header = !self.path.exists()
            || std::fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| RotationError::Open {
                path: self.path.clone(),
                source: e,
            })?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        for row in rows {
            writer.serialize(row).map_err(|e| RotationError::Append {
                path: self.path.clone(),
                source: e,
            })?;
        }
        writer.flush().map_err(|e| RotationError::Append {
            path: self.path.clone(),
            source: csv::Error::from(e),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineup::Side;

    fn row(game_id: &str, player_id: i64) -> RotationRow {
        RotationRow {
            game_id: game_id.to_string(),
            side: Side::Home,
            player_id,
            in_time_real: 0.0,
            out_time_real: 7200.0,
        }
    }

    #[test]
    fn missing_store_degrades_to_empty_book() {
        let dir = tempfile::tempdir().unwrap();
        let store = RotationStore::new(dir.path().join("absent.csv"));
        assert!(store.load_book().unwrap().is_empty());
        assert!(store.existing_game_ids().unwrap().is_empty());
    }

    #[test]
    fn append_then_reload_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = RotationStore::new(dir.path().join("rotations.csv"));

        store.append(&[row("0022400001", 1), row("0022400001", 2)]).unwrap();
        store.append(&[row("0022400002", 3)]).unwrap();

        let ids = store.existing_game_ids().unwrap();
        assert!(ids.contains("0022400001"));
        assert!(ids.contains("0022400002"));
        assert_eq!(ids.len(), 2);

        let book = store.load_book().unwrap();
        assert_eq!(book.len(), 2);
        // deciseconds on disk, seconds in the index
        let on_court = book.get("0022400001").unwrap().on_court(Side::Home, 100.0);
        assert_eq!(on_court, vec![1, 2]);
        assert!(
            book.get("0022400001")
                .unwrap()
                .on_court(Side::Home, 720.0)
                .is_empty(),
            "span is half-open at the out instant"
        );
    }
}

use hashbrown::HashMap;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

use super::error::ReaderError;
use super::parser::{EventParser, RawRow};
use super::play_event::PlayEvent;
use crate::context::{Sym, resolve};

/// All events of one season file, grouped per game.
#[derive(Debug, Default)]
pub struct SeasonLog {
    games: HashMap<Sym, Vec<PlayEvent>>,
    skipped_rows: usize,
}

impl SeasonLog {
    /// Number of games.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn total_events(&self) -> usize {
        self.games.values().map(Vec::len).sum()
    }

    /// Rows dropped during ingestion (unreadable or unkeyed).
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Game ids in lexical order, so every run visits games identically.
    pub fn game_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<&'static str> = self.games.keys().map(|k| resolve(*k)).collect();
        ids.sort_unstable();
        ids
    }

    /// Consume the log into (game id, events) pairs in lexical id order.
    pub fn into_games(self) -> Vec<(Sym, Vec<PlayEvent>)> {
        let mut games: Vec<(Sym, Vec<PlayEvent>)> = self.games.into_iter().collect();
        games.sort_unstable_by_key(|(k, _)| resolve(*k));
        games
    }

    pub fn get(&self, game_id: &str) -> Option<&[PlayEvent]> {
        self.games
            .iter()
            .find(|(k, _)| resolve(**k) == game_id)
            .map(|(_, v)| v.as_slice())
    }
}

/// Season-table reader: memory-maps the file and streams CSV records
/// through the row parser.
pub struct LogReader;

impl LogReader {
    pub fn load_season(path: &Path) -> Result<SeasonLog, ReaderError> {
        let file = File::open(path).map_err(|e| ReaderError::OpenFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        // Safety: the season file is treated as read-only for the whole run.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| ReaderError::MemoryMap {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(mmap.as_ref());
        reader.headers().map_err(|e| ReaderError::Header {
            path: path.to_path_buf(),
            source: e,
        })?;

        let parser = EventParser::new();
        let mut games: HashMap<Sym, Vec<PlayEvent>> = HashMap::new();
        let mut skipped_rows = 0usize;

        for (idx, record) in reader.deserialize::<RawRow>().enumerate() {
            let row = match record {
                Ok(row) => row,
                Err(e) => {
                    tracing::debug!(row = idx + 2, error = %e, "skipping unreadable row");
                    skipped_rows += 1;
                    continue;
                }
            };
            match parser.parse_row(idx as u32 + 1, row) {
                Some(event) => games.entry(event.game_id).or_default().push(event),
                None => skipped_rows += 1,
            }
        }

        if games.is_empty() {
            return Err(ReaderError::NoUsableRows {
                path: path.to_path_buf(),
            });
        }

        tracing::info!(
            games = games.len(),
            events = games.values().map(Vec::len).sum::<usize>(),
            skipped = skipped_rows,
            "season file loaded"
        );

        Ok(SeasonLog {
            games,
            skipped_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::play_log::EventKind;

    const HEADER: &str = "gameId,actionNumber,period,clock,actionType,subType,description,playerName,personId,teamId,teamTricode,scoreHome,scoreAway,shotResult,personIdsFilter,pointsTotal,foulPersonalTotal,reboundOffensiveTotal,reboundDefensiveTotal,turnoverTotal";

    fn write_season(rows: &[&str]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("season.csv");
        let mut content = String::from(HEADER);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_and_groups_by_game() {
        let (_dir, path) = write_season(&[
            "0022400001,1,1,PT12M00.00S,period,start,Period Start,,,,,,,,,,,,,",
            "0022400001,2,1,PT11M40.00S,2pt,Jump Shot,\"Curry 2pt Shot: Made (2 PTS)\",Curry,201939,1610612744,GSW,2,0,Made,,2,,,,",
            "0022400002,1,1,PT12M00.00S,period,start,Period Start,,,,,,,,,,,,,",
        ]);
        let season = LogReader::load_season(&path).unwrap();
        assert_eq!(season.len(), 2);
        assert_eq!(season.total_events(), 3);
        assert_eq!(season.game_ids(), vec!["0022400001", "0022400002"]);

        let game = season.get("0022400001").unwrap();
        assert_eq!(game.len(), 2);
        assert_eq!(game[1].kind, EventKind::Shot);
        assert_eq!(game[1].seconds_remaining, 700.0);
        assert_eq!(game[1].player_id, Some(201939));
    }

    #[test]
    fn unreadable_table_is_the_only_fatal_case() {
        let (_dir, path) = write_season(&[]);
        assert!(matches!(
            LogReader::load_season(&path),
            Err(ReaderError::NoUsableRows { .. })
        ));

        let missing = path.with_file_name("nope.csv");
        assert!(matches!(
            LogReader::load_season(&missing),
            Err(ReaderError::OpenFile { .. })
        ));
    }
}

//! Rotation interval model and per-game lookup index.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::lineup::Side;

/// One continuous on-court span, provider-native.
///
/// `IN_TIME_REAL`/`OUT_TIME_REAL` are tenths of seconds on the absolute
/// elapsed axis, exactly as the provider returns them; the store keeps them
/// raw so appended batches and reloaded files agree byte-for-byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationRow {
    #[serde(rename = "gameId")]
    pub game_id: String,
    #[serde(rename = "team_side")]
    pub side: Side,
    #[serde(rename = "PERSON_ID")]
    pub player_id: i64,
    #[serde(rename = "IN_TIME_REAL")]
    pub in_time_real: f64,
    #[serde(rename = "OUT_TIME_REAL")]
    pub out_time_real: f64,
}

impl RotationRow {
    pub fn time_in_secs(&self) -> f64 {
        self.in_time_real / 10.0
    }

    pub fn time_out_secs(&self) -> f64 {
        self.out_time_real / 10.0
    }
}

/// Interval index for one game, on the elapsed-seconds axis.
#[derive(Debug, Clone, Default)]
pub struct GameRotation {
    home: Vec<(i64, f64, f64)>,
    away: Vec<(i64, f64, f64)>,
}

impl GameRotation {
    pub fn push(&mut self, row: &RotationRow) {
        let span = (row.player_id, row.time_in_secs(), row.time_out_secs());
        match row.side {
            Side::Home => self.home.push(span),
            Side::Away => self.away.push(span),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.home.is_empty() && self.away.is_empty()
    }

    /// Player ids whose span contains `elapsed` ([in, out)), sorted and
    /// deduplicated so the result is already canonical.
    pub fn on_court(&self, side: Side, elapsed: f64) -> Vec<i64> {
        let spans = match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        };
        let mut ids: Vec<i64> = spans
            .iter()
            .filter(|(_, time_in, time_out)| *time_in <= elapsed && elapsed < *time_out)
            .map(|(id, _, _)| *id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// All loaded rotations, keyed by game id.
#[derive(Debug, Clone, Default)]
pub struct RotationBook {
    games: HashMap<String, GameRotation>,
}

impl RotationBook {
    pub fn from_rows<I: IntoIterator<Item = RotationRow>>(rows: I) -> Self {
        let mut book = Self::default();
        for row in rows {
            book.games.entry(row.game_id.clone()).or_default().push(&row);
        }
        book
    }

    pub fn get(&self, game_id: &str) -> Option<&GameRotation> {
        self.games.get(game_id)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn contains(&self, game_id: &str) -> bool {
        self.games.contains_key(game_id)
    }
}

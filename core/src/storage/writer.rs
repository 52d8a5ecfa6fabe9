//! Parquet writer for reconstructed state rows.
//!
//! One file per game, fully regenerated each run. Rows are written in
//! canonical event order and lineups in canonical sorted order, so an
//! unchanged input reproduces the output byte for byte.

use arrow::array::{
    ArrayRef, BooleanBuilder, Float64Builder, Int32Builder, Int64Builder, StringBuilder,
    UInt8Builder, UInt32Builder,
};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use super::error::StorageError;
use crate::context::resolve;
use crate::reconstruct::ResolvedState;

/// Join a canonical lineup into a stable text cell.
fn lineup_cell(ids: &[i64]) -> String {
    let mut out = String::with_capacity(ids.len() * 8);
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            out.push('|');
        }
        out.push_str(&id.to_string());
    }
    out
}

/// Buffering writer for one game's resolved states.
pub struct StateWriter {
    rows: Vec<ResolvedState>,
}

impl Default for StateWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl StateWriter {
    pub fn new() -> Self {
        Self {
            rows: Vec::with_capacity(1_000),
        }
    }

    pub fn push(&mut self, state: ResolvedState) {
        self.rows.push(state);
    }

    pub fn extend<I: IntoIterator<Item = ResolvedState>>(&mut self, states: I) {
        self.rows.extend(states);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Write buffered rows to a parquet file.
    pub fn write_to_file(&self, path: &Path) -> Result<(), StorageError> {
        if self.rows.is_empty() {
            return Ok(());
        }

        let schema = Self::schema();
        let batch = self.build_record_batch(&schema)?;

        let file = File::create(path).map_err(|e| StorageError::CreateFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        let props = WriterProperties::builder()
            .set_compression(Compression::ZSTD(Default::default()))
            .build();

        let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
        writer.write(&batch)?;
        writer.close()?;

        Ok(())
    }

    fn schema() -> Arc<Schema> {
        Arc::new(Schema::new(vec![
            Field::new("game_id", DataType::Utf8, false),
            Field::new("order", DataType::UInt32, false),
            Field::new("period", DataType::UInt8, false),
            Field::new("kind", DataType::Utf8, false),
            Field::new("seconds_remaining", DataType::Float64, false),
            Field::new("elapsed_seconds", DataType::Float64, false),
            Field::new("score_home", DataType::Int32, false),
            Field::new("score_away", DataType::Int32, false),
            Field::new("score_margin", DataType::Int32, false),
            Field::new("possession_id", DataType::UInt32, false),
            Field::new("shot_clock", DataType::Float64, false),
            Field::new("home_lineup", DataType::Utf8, false),
            Field::new("away_lineup", DataType::Utf8, false),
            Field::new("confidence", DataType::Utf8, false),
            Field::new("is_complete", DataType::Boolean, false),
            Field::new("timeouts_home", DataType::UInt8, false),
            Field::new("timeouts_away", DataType::UInt8, false),
            Field::new("team_fouls_home", DataType::UInt32, false),
            Field::new("team_fouls_away", DataType::UInt32, false),
            Field::new("cum_points_home", DataType::Int64, false),
            Field::new("cum_points_away", DataType::Int64, false),
            Field::new("cum_fouls_home", DataType::Int64, false),
            Field::new("cum_fouls_away", DataType::Int64, false),
            Field::new("cum_rebounds_home", DataType::Int64, false),
            Field::new("cum_rebounds_away", DataType::Int64, false),
            Field::new("cum_turnovers_home", DataType::Int64, false),
            Field::new("cum_turnovers_away", DataType::Int64, false),
            Field::new("stint_index", DataType::UInt32, false),
            Field::new("seconds_since_sub", DataType::Float64, false),
        ]))
    }

    fn build_record_batch(&self, schema: &Arc<Schema>) -> Result<RecordBatch, StorageError> {
        let len = self.rows.len();

        let mut game_id = StringBuilder::with_capacity(len, len * 10);
        let mut order = UInt32Builder::with_capacity(len);
        let mut period = UInt8Builder::with_capacity(len);
        let mut kind = StringBuilder::with_capacity(len, len * 8);
        let mut seconds_remaining = Float64Builder::with_capacity(len);
        let mut elapsed_seconds = Float64Builder::with_capacity(len);
        let mut score_home = Int32Builder::with_capacity(len);
        let mut score_away = Int32Builder::with_capacity(len);
        let mut score_margin = Int32Builder::with_capacity(len);
        let mut possession_id = UInt32Builder::with_capacity(len);
        let mut shot_clock = Float64Builder::with_capacity(len);
        let mut home_lineup = StringBuilder::with_capacity(len, len * 40);
        let mut away_lineup = StringBuilder::with_capacity(len, len * 40);
        let mut confidence = StringBuilder::with_capacity(len, len * 12);
        let mut is_complete = BooleanBuilder::with_capacity(len);
        let mut timeouts_home = UInt8Builder::with_capacity(len);
        let mut timeouts_away = UInt8Builder::with_capacity(len);
        let mut team_fouls_home = UInt32Builder::with_capacity(len);
        let mut team_fouls_away = UInt32Builder::with_capacity(len);
        let mut cum_points_home = Int64Builder::with_capacity(len);
        let mut cum_points_away = Int64Builder::with_capacity(len);
        let mut cum_fouls_home = Int64Builder::with_capacity(len);
        let mut cum_fouls_away = Int64Builder::with_capacity(len);
        let mut cum_rebounds_home = Int64Builder::with_capacity(len);
        let mut cum_rebounds_away = Int64Builder::with_capacity(len);
        let mut cum_turnovers_home = Int64Builder::with_capacity(len);
        let mut cum_turnovers_away = Int64Builder::with_capacity(len);
        let mut stint_index = UInt32Builder::with_capacity(len);
        let mut seconds_since_sub = Float64Builder::with_capacity(len);

        for row in &self.rows {
            game_id.append_value(resolve(row.game_id));
            order.append_value(row.order);
            period.append_value(row.period);
            kind.append_value(row.kind.as_str());
            seconds_remaining.append_value(row.seconds_remaining);
            elapsed_seconds.append_value(row.elapsed_seconds);
            score_home.append_value(row.score_home);
            score_away.append_value(row.score_away);
            score_margin.append_value(row.score_margin);
            possession_id.append_value(row.possession_id);
            shot_clock.append_value(row.shot_clock);
            home_lineup.append_value(lineup_cell(&row.home_lineup));
            away_lineup.append_value(lineup_cell(&row.away_lineup));
            confidence.append_value(row.confidence.as_str());
            is_complete.append_value(row.is_complete());
            timeouts_home.append_value(row.inventory.home.timeouts_remaining);
            timeouts_away.append_value(row.inventory.away.timeouts_remaining);
            team_fouls_home.append_value(row.inventory.home.fouls_period);
            team_fouls_away.append_value(row.inventory.away.fouls_period);
            cum_points_home.append_value(row.inventory.home.totals.points);
            cum_points_away.append_value(row.inventory.away.totals.points);
            cum_fouls_home.append_value(row.inventory.home.totals.fouls);
            cum_fouls_away.append_value(row.inventory.away.totals.fouls);
            cum_rebounds_home.append_value(row.inventory.home.totals.rebounds);
            cum_rebounds_away.append_value(row.inventory.away.totals.rebounds);
            cum_turnovers_home.append_value(row.inventory.home.totals.turnovers);
            cum_turnovers_away.append_value(row.inventory.away.totals.turnovers);
            stint_index.append_value(row.stint_index);
            seconds_since_sub.append_value(row.seconds_since_sub);
        }

        let columns: Vec<ArrayRef> = vec![
            Arc::new(game_id.finish()),
            Arc::new(order.finish()),
            Arc::new(period.finish()),
            Arc::new(kind.finish()),
            Arc::new(seconds_remaining.finish()),
            Arc::new(elapsed_seconds.finish()),
            Arc::new(score_home.finish()),
            Arc::new(score_away.finish()),
            Arc::new(score_margin.finish()),
            Arc::new(possession_id.finish()),
            Arc::new(shot_clock.finish()),
            Arc::new(home_lineup.finish()),
            Arc::new(away_lineup.finish()),
            Arc::new(confidence.finish()),
            Arc::new(is_complete.finish()),
            Arc::new(timeouts_home.finish()),
            Arc::new(timeouts_away.finish()),
            Arc::new(team_fouls_home.finish()),
            Arc::new(team_fouls_away.finish()),
            Arc::new(cum_points_home.finish()),
            Arc::new(cum_points_away.finish()),
            Arc::new(cum_fouls_home.finish()),
            Arc::new(cum_fouls_away.finish()),
            Arc::new(cum_rebounds_home.finish()),
            Arc::new(cum_rebounds_away.finish()),
            Arc::new(cum_turnovers_home.finish()),
            Arc::new(cum_turnovers_away.finish()),
            Arc::new(stint_index.finish()),
            Arc::new(seconds_since_sub.finish()),
        ];

        Ok(RecordBatch::try_new(schema.clone(), columns)?)
    }
}

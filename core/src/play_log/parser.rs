use super::*;
use crate::context::{empty_sym, intern};
use crate::timeline;
use memchr::memmem;
use serde::Deserialize;

#[cfg(test)]
mod tests;

/// One raw record of the season table, with the provider's column names.
///
/// Nullable numeric columns come through as floats ("203954.0") because the
/// upstream export writes them that way; everything numeric is read as
/// `Option<f64>` and narrowed here.
#[derive(Debug, Default, Deserialize)]
pub struct RawRow {
    #[serde(rename = "gameId")]
    pub game_id: Option<String>,
    #[serde(rename = "actionNumber", alias = "orderNumber")]
    pub action_number: Option<f64>,
    pub period: Option<f64>,
    pub clock: Option<String>,
    #[serde(rename = "actionType")]
    pub action_type: Option<String>,
    #[serde(rename = "subType")]
    pub sub_type: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "playerName")]
    pub player_name: Option<String>,
    #[serde(rename = "personId")]
    pub person_id: Option<f64>,
    #[serde(rename = "teamId")]
    pub team_id: Option<f64>,
    #[serde(rename = "teamTricode")]
    pub team_tricode: Option<String>,
    #[serde(rename = "scoreHome")]
    pub score_home: Option<f64>,
    #[serde(rename = "scoreAway")]
    pub score_away: Option<f64>,
    #[serde(rename = "shotResult")]
    pub shot_result: Option<String>,
    #[serde(rename = "personIdsFilter")]
    pub person_ids_filter: Option<String>,
    #[serde(rename = "pointsTotal")]
    pub points: Option<f64>,
    #[serde(rename = "foulPersonalTotal")]
    pub fouls_personal: Option<f64>,
    #[serde(rename = "reboundOffensiveTotal")]
    pub rebounds_off: Option<f64>,
    #[serde(rename = "reboundDefensiveTotal")]
    pub rebounds_def: Option<f64>,
    #[serde(rename = "turnoverTotal")]
    pub turnovers: Option<f64>,
}

pub struct EventParser;

impl Default for EventParser {
    fn default() -> Self {
        Self::new()
    }
}

impl EventParser {
    pub fn new() -> Self {
        Self
    }

    /// Convert a raw record into a typed event. `fallback_order` stands in
    /// when the sequence column is absent so the total order stays strict.
    /// Returns None only when the row cannot be keyed to a game.
    pub fn parse_row(&self, fallback_order: u32, row: RawRow) -> Option<PlayEvent> {
        let game_id = row.game_id.as_deref().map(str::trim).filter(|s| !s.is_empty())?;

        let description = row.description.unwrap_or_default();
        let kind = Self::classify(row.action_type.as_deref().unwrap_or(""), &description);

        let clock_text = row.clock.unwrap_or_default();
        let seconds_remaining = timeline::parse_clock(&clock_text);

        Some(PlayEvent {
            game_id: intern(game_id),
            order: as_u32(row.action_number).unwrap_or(fallback_order),
            period: as_u32(row.period).map(|p| p as u8).unwrap_or(1),
            clock: intern(clock_text.trim()),
            seconds_remaining,
            kind,
            sub_type: row
                .sub_type
                .as_deref()
                .map(|s| intern(s.trim()))
                .unwrap_or_else(empty_sym),
            player_id: as_id(row.person_id),
            player_name: row
                .player_name
                .as_deref()
                .map(|s| intern(s.trim()))
                .unwrap_or_else(empty_sym),
            team_id: as_id(row.team_id),
            team_tricode: row
                .team_tricode
                .as_deref()
                .map(|s| intern(s.trim()))
                .unwrap_or_else(empty_sym),
            lineup_filter: row.person_ids_filter.filter(|s| !s.trim().is_empty()),
            score_home: as_i64(row.score_home).map(|v| v as i32),
            score_away: as_i64(row.score_away).map(|v| v as i32),
            shot_result: row.shot_result.as_deref().and_then(Self::parse_shot_result),
            stats: StatDeltas {
                points: as_i64(row.points).unwrap_or(0) as i32,
                fouls_personal: as_i64(row.fouls_personal).unwrap_or(0) as i32,
                rebounds_off: as_i64(row.rebounds_off).unwrap_or(0) as i32,
                rebounds_def: as_i64(row.rebounds_def).unwrap_or(0) as i32,
                turnovers: as_i64(row.turnovers).unwrap_or(0) as i32,
            },
            description,
        })
    }

    /// Category from the action-type label. Older exports carry the numeric
    /// message type instead of a label; the free text is the last resort.
    fn classify(action_type: &str, description: &str) -> EventKind {
        let t = action_type.trim();
        if let Ok(code) = t.parse::<i32>() {
            return match code {
                1 | 2 => EventKind::Shot,
                3 => EventKind::FreeThrow,
                4 => EventKind::Rebound,
                5 => EventKind::Turnover,
                6 => EventKind::Foul,
                8 => EventKind::Substitution,
                9 => EventKind::Timeout,
                12 | 13 => EventKind::PeriodMarker,
                _ => EventKind::Other,
            };
        }
        match t.to_ascii_lowercase().as_str() {
            "2pt" | "3pt" => EventKind::Shot,
            "freethrow" | "free throw" => EventKind::FreeThrow,
            "rebound" => EventKind::Rebound,
            "turnover" => EventKind::Turnover,
            "foul" => EventKind::Foul,
            "substitution" => EventKind::Substitution,
            "timeout" => EventKind::Timeout,
            "period" => EventKind::PeriodMarker,
            _ => {
                let b = description.as_bytes();
                if memmem::find(b, b"Timeout").is_some() {
                    EventKind::Timeout
                } else if memmem::find(b, b"SUB").is_some() {
                    EventKind::Substitution
                } else {
                    EventKind::Other
                }
            }
        }
    }

    fn parse_shot_result(s: &str) -> Option<ShotResult> {
        if s.eq_ignore_ascii_case("made") {
            Some(ShotResult::Made)
        } else if s.eq_ignore_ascii_case("missed") {
            Some(ShotResult::Missed)
        } else {
            None
        }
    }
}

fn as_i64(v: Option<f64>) -> Option<i64> {
    v.filter(|f| f.is_finite()).map(|f| f as i64)
}

/// Entity ids: the export writes 0 for "no id".
fn as_id(v: Option<f64>) -> Option<i64> {
    as_i64(v).filter(|&i| i != 0)
}

fn as_u32(v: Option<f64>) -> Option<u32> {
    as_i64(v).filter(|&i| i >= 0).map(|i| i as u32)
}
